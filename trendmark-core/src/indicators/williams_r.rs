//! Williams %R.
//!
//! WR = 100 * (highest_high - close) / (highest_high - lowest_low) over the
//! last `period` candles, on the 0..100 scale (0 = at the high). A flat
//! window (no range) yields NaN.

use super::rolling::{rolling_max, rolling_min};
use super::Indicator;
use crate::domain::Candle;

#[derive(Debug, Clone)]
pub struct WilliamsR {
    period: usize,
    name: String,
}

impl WilliamsR {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "WR period must be >= 1");
        Self {
            period,
            name: format!("wr_{period}"),
        }
    }
}

impl Indicator for WilliamsR {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
        let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
        let hh = rolling_max(&highs, self.period);
        let ll = rolling_min(&lows, self.period);

        candles
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let range = hh[i] - ll[i];
                if range == 0.0 {
                    f64::NAN
                } else {
                    100.0 * (hh[i] - c.close) / range
                }
            })
            .collect()
    }
}
