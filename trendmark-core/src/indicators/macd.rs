//! MACD line: EMA(12) - EMA(26) of close.

use super::ema::ema_of_series;
use super::{closes, Indicator};
use crate::domain::Candle;

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
}

impl Macd {
    pub fn new(fast: usize, slow: usize) -> Self {
        assert!(fast >= 1 && slow > fast, "MACD needs 1 <= fast < slow");
        Self { fast, slow }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new(12, 26)
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        "macd"
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let close = closes(candles);
        let fast = ema_of_series(&close, self.fast);
        let slow = ema_of_series(&close, self.slow);
        fast.iter().zip(&slow).map(|(f, s)| f - s).collect()
    }
}
