//! Error taxonomy
//!
//! Two fatal families: missing/corrupt assets and malformed level data.
//! Both halt the session with a diagnostic; there is no recovery path.
//! A disconnected controller is deliberately NOT an error - the driver
//! blocks in a reconnect prompt instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// A required model/image is absent from the archive
    #[error("asset not found in archive: {name}")]
    AssetMissing { name: String },

    /// The pack container itself is unreadable
    #[error("pack archive corrupt: {reason}")]
    ArchiveCorrupt { reason: String },

    /// A level row template contains a character with no block mapping
    #[error("level {level}, row {row}, col {col}: unknown template char {ch:?}")]
    BadTemplateChar {
        level: u32,
        row: usize,
        col: usize,
        ch: char,
    },

    /// A level template defines more blocks than the pool holds
    #[error("level {level}: block pool exhausted while placing rows")]
    BlockPoolExhausted { level: u32 },

    /// Level index outside the supported table
    #[error("unsupported level index {index}")]
    UnsupportedLevel { index: u32 },
}
