//! Hardware-facing contracts: controller input, packed asset storage, and
//! the presentation surface. Everything here is a seam; the null
//! implementations back the tests and the headless demo binary.

pub mod assets;
pub mod input;
pub mod present;
