//! TRIX — percentage rate of change of a triple-smoothed EMA of close.
//!
//! TRIX[t] = 100 * (EMA3[t] - EMA3[t-1]) / EMA3[t-1], where EMA3 is the EMA
//! applied three times. The first value has no predecessor and is NaN.

use super::ema::ema_of_series;
use super::{closes, Indicator};
use crate::domain::Candle;

#[derive(Debug, Clone)]
pub struct Trix {
    span: usize,
}

impl Trix {
    pub fn new(span: usize) -> Self {
        assert!(span >= 1, "TRIX span must be >= 1");
        Self { span }
    }
}

impl Default for Trix {
    fn default() -> Self {
        Self::new(12)
    }
}

impl Indicator for Trix {
    fn name(&self) -> &str {
        "trix"
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let single = ema_of_series(&closes(candles), self.span);
        let double = ema_of_series(&single, self.span);
        let triple = ema_of_series(&double, self.span);

        (0..triple.len())
            .map(|i| {
                if i == 0 {
                    return f64::NAN;
                }
                let prev = triple[i - 1];
                100.0 * (triple[i] - prev) / prev
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_candles, DEFAULT_EPSILON};

    #[test]
    fn first_value_is_nan() {
        let result = Trix::default().compute(&make_candles(&[10.0, 11.0]));
        assert!(result[0].is_nan());
        assert!(!result[1].is_nan());
    }

    #[test]
    fn flat_price_has_zero_trix() {
        let result = Trix::default().compute(&make_candles(&[20.0; 15]));
        for v in &result[1..] {
            assert_approx(*v, 0.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn rising_price_has_positive_trix() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + 2.0 * i as f64).collect();
        let result = Trix::default().compute(&make_candles(&closes));
        assert!(result[1..].iter().all(|&v| v > 0.0));
    }
}
