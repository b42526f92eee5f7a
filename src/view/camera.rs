//! Follow camera
//!
//! The camera trails the paddle from above and behind, aiming at a weighted
//! average of the paddle and every free-flying ball. Each ball pulls the
//! target toward the midpoint between itself and the paddle, so the view
//! leans into the action without ever losing the paddle.

use glam::{Mat4, Vec3, Vec4};

use super::to_render_vec;
use crate::consts::{CAMERA_BACK, CAMERA_RISE};
use crate::sim::fixed::Vec3Fp;
use crate::sim::state::{Ball, Paddle};

/// Build the view transform for this frame. Runs after the simulation
/// tick and before any object placement.
pub fn compute_view(paddle: &Paddle, balls: &[Ball]) -> Mat4 {
    // Running average in FP-units: the paddle counts once, each free ball
    // adds (paddle + ball) at weight 2
    let mut sum = paddle.pos;
    let mut weight = 1;
    for ball in balls.iter().filter(|b| b.enabled && !b.grabbed) {
        sum += paddle.pos + ball.pos;
        weight += 2;
    }
    let target_fp = Vec3Fp::new(sum.x / weight, sum.y / weight, sum.z / weight);

    let eye = to_render_vec(paddle.pos + Vec3Fp::new(0, CAMERA_RISE, CAMERA_BACK));
    let target = to_render_vec(target_fp);

    // Screen-up points along -y, matching the hardware's flipped vertical
    let up = Vec3::new(0.0, -1.0, 0.0);
    let forward = (target - eye).normalize_or_zero();
    let right = forward.cross(up).normalize_or_zero();
    let true_up = forward.cross(right).normalize_or_zero();

    // Rows are the camera basis; translation brings the eye to the origin
    Mat4::from_cols(
        Vec4::new(right.x, true_up.x, forward.x, 0.0),
        Vec4::new(right.y, true_up.y, forward.y, 0.0),
        Vec4::new(right.z, true_up.z, forward.z, 0.0),
        Vec4::new(-right.dot(eye), -true_up.dot(eye), -forward.dot(eye), 1.0),
    )
}
