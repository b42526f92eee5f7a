//! Level templates and layout building
//!
//! Levels are literal ASCII row strings, 9 cells wide. Each non-space
//! character maps to a (kind, power) pair; rows stack downward from the far
//! wall. Building a level is a full reset: both pools are cleared and exactly
//! one grabbed ball is re-anchored to the paddle before any block is placed.

use super::fixed::Vec3Fp;
use super::state::{Block, Session};
use crate::GameError;
use crate::consts::*;

pub const LEVEL_COUNT: u32 = 3;

/// Row templates per level, outermost row first
const LEVELS: [&[&str]; LEVEL_COUNT as usize] = [
    &[
        "111111111", //
        " 2222222 ",
        "111111111",
    ],
    &[
        "3 3 3 3 3", //
        " 2222222 ",
        "121212121",
        "111111111",
    ],
    &[
        "444444444", //
        "3       3",
        "232222232",
        "111111111",
    ],
];

/// Template character to (kind, power)
fn cell_block(ch: char) -> Option<(u8, u8)> {
    match ch {
        '1' => Some((1, 1)),
        '2' => Some((2, 2)),
        '3' => Some((3, 4)),
        '4' => Some((3, 3)),
        _ => None,
    }
}

/// Rebuild the session's pools for the given level index
pub fn build_level(session: &mut Session, level_index: u32) -> Result<(), GameError> {
    let rows = LEVELS
        .get(level_index as usize)
        .ok_or(GameError::UnsupportedLevel { index: level_index })?;
    place_rows(session, level_index, rows)
}

/// Reset the pools and place the given rows into the block arena
fn place_rows(session: &mut Session, level: u32, rows: &[&str]) -> Result<(), GameError> {
    session.reset_pools();
    session.spawn_grabbed_ball(Vec3Fp::ZERO);

    for (row, cells) in rows.iter().enumerate() {
        let z = ROW_BASE_Z - (row as i32) * ROW_STEP_Z - ROW_OFFSET_Z;
        for (col, ch) in cells.chars().take(ROW_WIDTH).enumerate() {
            if ch == ' ' {
                continue;
            }
            let (kind, power) = cell_block(ch).ok_or(GameError::BadTemplateChar {
                level,
                row,
                col,
                ch,
            })?;
            let slot = session
                .alloc_block()
                .ok_or(GameError::BlockPoolExhausted { level })?;
            session.blocks[slot] = Block {
                kind,
                power,
                pos: Vec3Fp::new(ROW_ORIGIN_X + (col as i32) * COLUMN_STEP, 0, z),
            };
        }
    }

    log::info!(
        "level {} built: {} blocks",
        level + 1,
        session.alive_blocks()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_first_level() {
        let mut session = Session::new();
        build_level(&mut session, 0).unwrap();
        // 9 + 7 + 9 cells
        assert_eq!(session.alive_blocks(), 25);
        // Exactly one grabbed ball anchored to the paddle
        assert_eq!(session.active_balls(), 1);
        let ball = session.balls[0];
        assert!(ball.grabbed);
        assert_eq!(ball.pos, session.paddle.pos);
    }

    #[test]
    fn block_positions_follow_grid() {
        let mut session = Session::new();
        build_level(&mut session, 0).unwrap();
        // First placed block: row 0, col 0
        let first = session.blocks[0];
        assert_eq!(first.pos.x, ROW_ORIGIN_X);
        assert_eq!(first.pos.z, ROW_BASE_Z - ROW_OFFSET_Z);
        // Row 1 starts at col 1 (leading space), one row step down
        let row1 = session.blocks[9];
        assert_eq!(row1.pos.x, ROW_ORIGIN_X + COLUMN_STEP);
        assert_eq!(row1.pos.z, ROW_BASE_Z - ROW_STEP_Z - ROW_OFFSET_Z);
    }

    #[test]
    fn char_map_kinds_and_power() {
        assert_eq!(cell_block('1'), Some((1, 1)));
        assert_eq!(cell_block('2'), Some((2, 2)));
        assert_eq!(cell_block('3'), Some((3, 4)));
        assert_eq!(cell_block('4'), Some((3, 3)));
        assert_eq!(cell_block('x'), None);
    }

    #[test]
    fn rejects_unknown_template_char() {
        let mut session = Session::new();
        let err = place_rows(&mut session, 0, &["11x"]).unwrap_err();
        assert!(matches!(
            err,
            GameError::BadTemplateChar { ch: 'x', row: 0, col: 2, .. }
        ));
    }

    #[test]
    fn rejects_pool_overflow() {
        let mut session = Session::new();
        // 4 full rows = 36 cells > 32 slots
        let rows = ["111111111"; 4];
        let err = place_rows(&mut session, 2, &rows).unwrap_err();
        assert!(matches!(err, GameError::BlockPoolExhausted { level: 2 }));
    }

    #[test]
    fn rejects_unsupported_index() {
        let mut session = Session::new();
        let err = build_level(&mut session, LEVEL_COUNT).unwrap_err();
        assert!(matches!(err, GameError::UnsupportedLevel { index } if index == LEVEL_COUNT));
    }

    #[test]
    fn rebuild_is_not_incremental() {
        let mut session = Session::new();
        build_level(&mut session, 0).unwrap();
        // Simulate mid-level state, then rebuild
        session.blocks[3].kind = 0;
        session.spawn_grabbed_ball(Vec3Fp::ZERO);
        build_level(&mut session, 1).unwrap();
        assert_eq!(session.active_balls(), 1);
        assert_eq!(session.alive_blocks(), 30);
    }

    #[test]
    fn all_levels_fit_the_pool() {
        let mut session = Session::new();
        for level in 0..LEVEL_COUNT {
            build_level(&mut session, level).unwrap();
            assert!(session.alive_blocks() <= MAX_BLOCKS as u32);
        }
    }
}
