//! TrendMark Core — candles, indicator columns, and the trend labeling engine.
//!
//! This crate contains everything that runs in memory:
//! - Domain types (candles, trend labels, labeling input)
//! - Indicator columns computed from candles (SMA, EMA, MACD, RSI, KDJ, ...)
//! - Forward-window min-max normalization
//! - Moving-average slope and price-vs-average trend detectors
//! - Per-index trend classification and the derived trading signal
//!
//! Reading files, downloading data, and writing outputs live in
//! `trendmark-runner`.

pub mod domain;
pub mod error;
pub mod indicators;
pub mod labeling;

pub use domain::{Candle, LabelInput, NamedSeries, TrendLabel};
pub use error::LabelError;
