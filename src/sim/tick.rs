//! Per-frame simulation advance
//!
//! `advance_frame` runs one fixed tick in a fixed order: paddle motion, then
//! every enabled ball (integrate, walls, death zone, blocks, paddle, grabbed
//! slaving), then the respawn policy, then the level-clear check. All motion
//! is a single Euler step per tick; there are no substeps.

use super::collision::{self, Axis};
use super::fixed::{Fp, Vec3Fp};
use super::level::LEVEL_COUNT;
use super::state::Session;
use crate::consts::*;

/// Steering input for one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Raw 0-255 stick axis when an analog-class controller is present;
    /// takes precedence over the digital directions
    pub stick_x: Option<u8>,
}

/// Advance the session by one tick; returns the enabled ball count
pub fn advance_frame(session: &mut Session, input: &TickInput) -> u32 {
    update_paddle(session, input);

    for idx in 0..MAX_BALLS {
        let mut ball = session.balls[idx];
        if !ball.enabled {
            continue;
        }
        if ball.grabbed {
            // Slaved to the paddle, no physics
            ball.pos = session.paddle.pos + ball.grabbed_offset;
            session.balls[idx] = ball;
            continue;
        }

        ball.pos += ball.vel;

        // Side walls reflect x and clamp slightly inside the bound
        if ball.pos.x > WALL_X {
            ball.vel.x = -ball.vel.x;
            ball.pos.x = WALL_X_CLAMP;
        } else if ball.pos.x < -WALL_X {
            ball.vel.x = -ball.vel.x;
            ball.pos.x = -WALL_X_CLAMP;
        }
        // Far wall behind the blocks
        if ball.pos.z > WALL_FAR_Z {
            ball.vel.z = -ball.vel.z;
            ball.pos.z = WALL_FAR_Z_CLAMP;
        }

        // Death zone: the ball leaves the pool
        if ball.pos.z < DEATH_Z {
            ball.enabled = false;
            session.balls[idx] = ball;
            continue;
        }

        hit_blocks(session, &mut ball);

        if collision::paddle_catches(ball.pos, session.paddle.pos) {
            ball.vel.z = -ball.vel.z;
            ball.pos.z += PADDLE_BOUNCE_NUDGE;
            // English: a third of the paddle's motion carries over
            ball.vel.x += session.paddle.vel.x / 3;
        }

        session.balls[idx] = ball;
    }

    // Respawn policy: losing the last ball costs a life
    if session.active_balls() == 0 {
        session.lives -= 1;
        if session.lives > 0 {
            session.spawn_grabbed_ball(Vec3Fp::ZERO);
        } else {
            log::info!(
                "game over at level {} with score {}",
                session.level + 1,
                session.score
            );
        }
    }

    // Level clear
    if session.alive_blocks() == 0 {
        session.score += (session.level as u64 + 1) * 10_000;
        if session.level == LEVEL_COUNT - 1 {
            // Literal source behavior: clearing the final level grants an
            // extra try
            session.lives += 1;
        }
        session.level = (session.level + 1) % LEVEL_COUNT;
        log::info!("level clear, advancing to level {}", session.level + 1);
    }

    session.active_balls()
}

/// Release the first grabbed ball, if any; later grabbed balls stay put
pub fn fire_ball(session: &mut Session) {
    let Some(idx) = session.balls.iter().position(|b| b.enabled && b.grabbed) else {
        return;
    };
    let paddle = session.paddle;
    let ball = &mut session.balls[idx];
    ball.grabbed = false;
    ball.pos = paddle.pos + Vec3Fp::new(0, 0, LAUNCH_OFFSET_Z);
    let dir = Vec3Fp::new(paddle.vel.x / 3, 0, LAUNCH_FORWARD).normalize();
    ball.vel = dir.scale_fp(LAUNCH_SPEED);
}

fn update_paddle(session: &mut Session, input: &TickInput) {
    let vel = match input.stick_x {
        Some(axis) => stick_velocity(axis),
        None => {
            let mut v = 0;
            if input.left {
                v -= PADDLE_SPEED;
            }
            if input.right {
                v += PADDLE_SPEED;
            }
            v
        }
    };
    session.paddle.vel.x = vel;
    session.paddle.pos.x += vel;
    let bound = WALL_X - PADDLE_HALF_WIDTH;
    session.paddle.pos.x = session.paddle.pos.x.clamp(-bound, bound);
}

/// Piecewise-linear deadzone map from the raw 0-255 stick axis to a
/// per-tick paddle velocity
pub fn stick_velocity(axis: u8) -> Fp {
    let axis = axis as i32;
    if axis < STICK_DEAD_LOW {
        ((axis - STICK_DEAD_LOW) * 100) / 1050
    } else if axis > STICK_DEAD_HIGH {
        ((axis - STICK_DEAD_HIGH) * 100) / 1050
    } else {
        0
    }
}

fn hit_blocks(session: &mut Session, ball: &mut super::state::Ball) {
    for slot in 0..MAX_BLOCKS {
        let block = session.blocks[slot];
        if !block.alive() || !collision::ball_block_overlap(ball.pos, block.pos) {
            continue;
        }

        let kind = block.kind;
        session.blocks[slot].power -= 1;
        session.score += kind as u64;
        if session.blocks[slot].power == 0 {
            session.blocks[slot].kind = 0;
            session.score += 100 * kind as u64;
        }

        let hit = collision::resolve_block_hit(ball.pos, block.pos);
        match hit.axis {
            Axis::X => {
                ball.vel.x = -ball.vel.x;
                ball.pos.x += BLOCK_NUDGE * hit.sign;
            }
            Axis::Z => {
                ball.vel.z = -ball.vel.z;
                ball.pos.z += BLOCK_NUDGE * hit.sign;
            }
        }
    }
}
