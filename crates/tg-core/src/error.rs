//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` where a
//! core primitive can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no cell at ({x}, {y})")]
    NoCellAt { x: u32, y: u32 },

    #[error("hourly distribution must have 24 entries, got {0}")]
    BadDistribution(usize),
}

/// Shorthand result type for `tg-core`.
pub type CoreResult<T> = Result<T, CoreError>;
