//! Axis-aligned collision helpers
//!
//! Balls are an 8-unit half-extent square in the x/z plane; blocks are
//! 32x16 half-extent boxes. Resolution reflects the velocity axis with the
//! smallest penetration depth. On equal depths the x-axis candidates win:
//! checks run in left, right, top, bottom order and replace the current
//! minimum only when strictly smaller.

use super::fixed::{Fp, Vec3Fp};
use crate::consts::*;

/// Axis whose velocity component gets reflected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Z,
}

/// Resolved block contact: which axis to reflect and which way to push
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHit {
    pub axis: Axis,
    /// +1 or -1, the direction the ball is nudged along `axis`
    pub sign: Fp,
}

/// Box overlap test between a ball and a block footprint
#[inline]
pub fn ball_block_overlap(ball: Vec3Fp, block: Vec3Fp) -> bool {
    (ball.x - block.x).abs() < BLOCK_HALF_X + BALL_HALF
        && (ball.z - block.z).abs() < BLOCK_HALF_Z + BALL_HALF
}

/// Pick the reflection axis from the four penetration depths
pub fn resolve_block_hit(ball: Vec3Fp, block: Vec3Fp) -> BlockHit {
    // Depth past each face of the block, from the ball's matching edge
    let left = (ball.x + BALL_HALF) - (block.x - BLOCK_HALF_X);
    let right = (block.x + BLOCK_HALF_X) - (ball.x - BALL_HALF);
    let top = (block.z + BLOCK_HALF_Z) - (ball.z - BALL_HALF);
    let bottom = (ball.z + BALL_HALF) - (block.z - BLOCK_HALF_Z);

    let mut hit = BlockHit {
        axis: Axis::X,
        sign: -1,
    };
    let mut min = left;
    if right < min {
        min = right;
        hit = BlockHit {
            axis: Axis::X,
            sign: 1,
        };
    }
    if top < min {
        min = top;
        hit = BlockHit {
            axis: Axis::Z,
            sign: 1,
        };
    }
    if bottom < min {
        hit = BlockHit {
            axis: Axis::Z,
            sign: -1,
        };
    }
    hit
}

/// Paddle catch window: ±x reach around the center, z just in front
#[inline]
pub fn paddle_catches(ball: Vec3Fp, paddle: Vec3Fp) -> bool {
    (ball.x - paddle.x).abs() <= PADDLE_REACH_X
        && ball.z >= paddle.z
        && ball.z <= paddle.z + PADDLE_REACH_Z
}
