//! View-side adapters: fixed-point world state in, float render math out.
//!
//! The simulation never touches floats; everything here converts on the way
//! to the draw queue and nothing flows back.

pub mod camera;
pub mod placement;

use glam::Vec3;

use crate::sim::fixed::{Fp, ONE, Vec3Fp};

/// FP-units to render units
#[inline]
pub fn to_render(v: Fp) -> f32 {
    v as f32 / ONE as f32
}

#[inline]
pub fn to_render_vec(v: Vec3Fp) -> Vec3 {
    Vec3::new(to_render(v.x), to_render(v.y), to_render(v.z))
}

/// Hardware angle units (4096 per full turn) to radians
#[inline]
pub fn to_radians(angle: Fp) -> f32 {
    angle as f32 / ONE as f32 * std::f32::consts::TAU
}
