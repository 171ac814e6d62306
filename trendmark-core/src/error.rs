//! Precondition errors raised by the labeling engine.
//!
//! Degenerate normalization windows and NaN arithmetic are not errors; they
//! are absorbed locally as `0.0`. Only misaligned or undersized input is
//! reported, and it is never retried.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("column '{column}' has {actual} rows, expected {expected} (series must be index-aligned)")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("series has {len} points, at least {required} are needed for a trend window")]
    SeriesTooShort { len: usize, required: usize },

    #[error("trend window [{start}, {end}] exceeds series of length {len}")]
    WindowOutOfBounds { start: usize, end: usize, len: usize },
}
