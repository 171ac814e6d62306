//! Candle — one OHLCV datapoint of the historical series.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// OHLCV candle for the single traded pair.
///
/// Volumes are kept as floats because crypto exchanges report fractional
/// base-currency volume (`volume_from`) and quote-currency volume
/// (`volume_to`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub datetime: NaiveDateTime,
    pub low: f64,
    pub high: f64,
    pub open: f64,
    pub close: f64,
    pub volume_from: f64,
    pub volume_to: f64,
}

impl Candle {
    /// Returns true if every numeric field is zero.
    ///
    /// Providers pad histories with such rows before the pair started trading.
    pub fn is_empty(&self) -> bool {
        self.low + self.high + self.open + self.close + self.volume_from + self.volume_to == 0.0
    }

    /// Typical price: (high + low + close) / 3.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}
