//! Commodity Channel Index (CCI).
//!
//! CCI = (TP - SMA(TP)) / (0.015 * MeanDeviation(TP)), where
//! TP = (high + low + close) / 3, over a `min_periods = 1` rolling window.
//! Zero mean deviation (flat window) yields 0.

use super::rolling::{rolling_mean, rolling_mean_deviation};
use super::Indicator;
use crate::domain::Candle;

const LAMBERT_CONSTANT: f64 = 0.015;

#[derive(Debug, Clone)]
pub struct Cci {
    period: usize,
}

impl Cci {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "CCI period must be >= 1");
        Self { period }
    }
}

impl Default for Cci {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Cci {
    fn name(&self) -> &str {
        "cci"
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let tp: Vec<f64> = candles.iter().map(Candle::typical_price).collect();
        let mean = rolling_mean(&tp, self.period);
        let deviation = rolling_mean_deviation(&tp, self.period);

        tp.iter()
            .zip(mean.iter().zip(&deviation))
            .map(|(&tp, (&mean, &dev))| {
                if dev == 0.0 {
                    0.0
                } else {
                    (tp - mean) / (LAMBERT_CONSTANT * dev)
                }
            })
            .collect()
    }
}
