//! Breakanoid - a 3D breakout game core
//!
//! Core modules:
//! - `sim`: integer fixed-point simulation (physics, collisions, session state)
//! - `view`: per-frame look-at camera and depth-sorted draw-queue placement
//! - `platform`: asset archive, controller snapshot, and presentation traits
//! - `driver`: title/gameplay state machine and the frame loop

pub mod driver;
pub mod error;
pub mod platform;
pub mod sim;
pub mod view;

pub use error::GameError;

/// Game configuration constants
///
/// Distances and velocities are FP-units: 4096 integer steps per world unit.
pub mod consts {
    use crate::sim::fixed::Fp;

    /// Pool capacities
    pub const MAX_BALLS: usize = 16;
    pub const MAX_BLOCKS: usize = 32;

    /// Playfield side walls at ±x; balls rebound to the clamp value
    pub const WALL_X: Fp = 300;
    pub const WALL_X_CLAMP: Fp = 290;
    /// Far wall behind the block field
    pub const WALL_FAR_Z: Fp = 150;
    pub const WALL_FAR_Z_CLAMP: Fp = 140;
    /// Balls crossing this z leave the pool
    pub const DEATH_Z: Fp = -400;

    /// Paddle
    pub const PADDLE_HALF_WIDTH: Fp = 32;
    pub const PADDLE_SPEED: Fp = 10;
    pub const PADDLE_START_Z: Fp = -300;
    /// Catch window: ±x around the paddle center, z in front of it
    pub const PADDLE_REACH_X: Fp = 50;
    pub const PADDLE_REACH_Z: Fp = 20;
    pub const PADDLE_BOUNCE_NUDGE: Fp = 10;

    /// Ball half-extent in the x/z plane
    pub const BALL_HALF: Fp = 8;
    /// Launch speed along the normalized fire direction
    pub const LAUNCH_SPEED: Fp = 7;
    /// Fixed forward z component of the fire direction, pre-normalization
    pub const LAUNCH_FORWARD: Fp = 10;
    /// Forward offset applied to a ball's position on release
    pub const LAUNCH_OFFSET_Z: Fp = 10;

    /// Block half-extents
    pub const BLOCK_HALF_X: Fp = 32;
    pub const BLOCK_HALF_Z: Fp = 16;
    /// Post-collision nudge away from a block, prevents re-triggering
    pub const BLOCK_NUDGE: Fp = 3;

    /// Level grid: 9 columns per row, rows stacked down from the far wall
    pub const ROW_WIDTH: usize = 9;
    pub const ROW_ORIGIN_X: Fp = -256;
    pub const COLUMN_STEP: Fp = 64;
    pub const ROW_BASE_Z: Fp = 150;
    pub const ROW_STEP_Z: Fp = 34;
    pub const ROW_OFFSET_Z: Fp = 16;

    /// Analog stick deadzone on the raw 0-255 axis (inclusive)
    pub const STICK_DEAD_LOW: i32 = 96;
    pub const STICK_DEAD_HIGH: i32 = 150;

    /// Camera eye offset from the paddle (FP-units)
    pub const CAMERA_RISE: Fp = -320;
    pub const CAMERA_BACK: Fp = -160;

    pub const START_LIVES: i16 = 3;
}
