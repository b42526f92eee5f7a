//! Session state and entity pools
//!
//! All run state lives in `Session`: score/level/lives plus the fixed-size
//! ball and block arenas. Slots are recycled with a first-free linear scan;
//! slot indices are stable for the lifetime of an entity, which rendering
//! relies on.

use serde::{Deserialize, Serialize};

use super::fixed::Vec3Fp;
use crate::consts::*;

/// A ball slot. A disabled ball has no meaningful pos/vel and is skipped
/// by every system.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Ball {
    pub enabled: bool,
    /// Attached to the paddle, exempt from physics until fired
    pub grabbed: bool,
    pub pos: Vec3Fp,
    /// Offset from the paddle while grabbed
    pub grabbed_offset: Vec3Fp,
    pub vel: Vec3Fp,
}

/// The player's paddle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec3Fp,
    pub vel: Vec3Fp,
    /// Orientation in hardware angle units (4096 per full turn)
    pub rot: Vec3Fp,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            pos: Vec3Fp::new(0, 0, PADDLE_START_Z),
            vel: Vec3Fp::ZERO,
            rot: Vec3Fp::ZERO,
        }
    }
}

/// A block slot; kind 0 means empty/destroyed
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Block {
    /// 0 = empty, 1-3 = block class (scoring multiplier)
    pub kind: u8,
    /// Remaining hits before destruction
    pub power: u8,
    pub pos: Vec3Fp,
}

impl Block {
    #[inline]
    pub fn alive(&self) -> bool {
        self.kind != 0
    }
}

/// One full play session: run counters, paddle, and the entity pools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// 0-based index into the level table
    pub level: u32,
    pub score: u64,
    pub lives: i16,
    pub paddle: Paddle,
    pub balls: [Ball; MAX_BALLS],
    pub blocks: [Block; MAX_BLOCKS],
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            level: 0,
            score: 0,
            lives: START_LIVES,
            paddle: Paddle::default(),
            balls: [Ball::default(); MAX_BALLS],
            blocks: [Block::default(); MAX_BLOCKS],
        }
    }

    /// First-fit scan for a free ball slot; enables it and returns the index
    pub fn alloc_ball(&mut self) -> Option<usize> {
        let idx = self.balls.iter().position(|b| !b.enabled)?;
        self.balls[idx] = Ball {
            enabled: true,
            ..Ball::default()
        };
        Some(idx)
    }

    /// First-fit scan for an empty block slot
    pub fn alloc_block(&mut self) -> Option<usize> {
        self.blocks.iter().position(|b| !b.alive())
    }

    /// Allocate a grabbed ball anchored to the paddle at the given offset
    pub fn spawn_grabbed_ball(&mut self, offset: Vec3Fp) -> Option<usize> {
        let idx = self.alloc_ball()?;
        let ball = &mut self.balls[idx];
        ball.grabbed = true;
        ball.grabbed_offset = offset;
        ball.pos = self.paddle.pos + offset;
        Some(idx)
    }

    /// Disable every ball and empty every block slot
    pub fn reset_pools(&mut self) {
        self.balls = [Ball::default(); MAX_BALLS];
        self.blocks = [Block::default(); MAX_BLOCKS];
    }

    pub fn active_balls(&self) -> u32 {
        self.balls.iter().filter(|b| b.enabled).count() as u32
    }

    pub fn alive_blocks(&self) -> u32 {
        self.blocks.iter().filter(|b| b.alive()).count() as u32
    }
}
