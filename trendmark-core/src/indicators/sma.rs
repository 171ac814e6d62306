//! Simple Moving Average (SMA).
//!
//! Rolling mean of close prices. The first `period - 1` values average the
//! shorter history available, so the column has no warmup gap; this is the
//! `close_15_sma` the trend classifier compares price against.

use super::rolling::rolling_mean;
use super::{closes, Indicator};
use crate::domain::Candle;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("close_{period}_sma"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        rolling_mean(&closes(candles), self.period)
    }
}
