//! Relative Strength Index (RSI).
//!
//! Smoothed (alpha = 1/period) average of gains and losses of close-to-close
//! changes. RSI = 100 * avg_gain / (avg_gain + avg_loss).
//! The first change is taken as zero. A window with neither gains nor losses
//! yields 50.

use super::ema::smma_of_series;
use super::{closes, Indicator};
use crate::domain::Candle;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let close = closes(candles);
        let n = close.len();
        let mut gains = vec![0.0; n];
        let mut losses = vec![0.0; n];

        for i in 1..n {
            let change = close[i] - close[i - 1];
            if change.is_nan() {
                gains[i] = f64::NAN;
                losses[i] = f64::NAN;
            } else if change > 0.0 {
                gains[i] = change;
            } else {
                losses[i] = -change;
            }
        }

        let avg_gain = smma_of_series(&gains, self.period);
        let avg_loss = smma_of_series(&losses, self.period);

        avg_gain
            .iter()
            .zip(&avg_loss)
            .map(|(&g, &l)| {
                let total = g + l;
                if total == 0.0 {
                    50.0
                } else {
                    100.0 * g / total
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_candles, DEFAULT_EPSILON};

    #[test]
    fn rsi_all_gains_is_100() {
        let closes: Vec<f64> = (0..20).map(|i| 10.0 + i as f64).collect();
        let result = Rsi::new(14).compute(&make_candles(&closes));
        assert_approx(result[19], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let result = Rsi::new(14).compute(&make_candles(&closes));
        assert_approx(result[19], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_flat_is_50() {
        let result = Rsi::new(14).compute(&make_candles(&[5.0; 10]));
        assert!(result.iter().all(|&v| v == 50.0));
    }

    #[test]
    fn rsi_bounds() {
        let closes = [44.0, 44.3, 44.1, 43.6, 44.3, 44.8, 45.1, 45.4, 45.8, 46.1, 45.9, 46.3];
        for v in Rsi::new(6).compute(&make_candles(&closes)) {
            assert!((0.0..=100.0).contains(&v), "RSI out of bounds: {v}");
        }
    }

    #[test]
    fn rsi_name() {
        assert_eq!(Rsi::new(14).name(), "rsi_14");
    }
}
