//! Trend labeling engine.
//!
//! Pure functions over in-memory, index-aligned series:
//! - `normalize`: forward-window min-max normalization
//! - `trend`: moving-average slope and price-vs-average detectors
//! - `classifier`: per-index Up/Down/Flat labels with a 4-step lookback
//! - `signal`: bounded trading signal from normalized close and label
//!
//! Every function produces exactly one output per input index.

pub mod classifier;
pub mod normalize;
pub mod signal;
pub mod trend;

pub use classifier::{classify_at, classify_trends, combine, window_start, LOOKBACK};
pub use normalize::{normalize, normalize_outcomes, normalize_window, Normalized, NORMALIZE_WINDOW};
pub use signal::{blend, signal_value, trading_signals, MAGNITUDE_WEIGHT, UP_TREND_BONUS};
pub use trend::{close_trend, sma_trend, Placement, Slope, TREND_WINDOW};
