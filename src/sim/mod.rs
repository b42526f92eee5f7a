//! Deterministic gameplay simulation: fixed-point math, entity pools,
//! level building, and the per-tick step.

pub mod collision;
pub mod fixed;
pub mod level;
pub mod state;
pub mod tick;

pub use fixed::{Fp, Vec3Fp};
pub use state::Session;
pub use tick::{TickInput, advance_frame, fire_ball};
