//! KDJ stochastic oscillator.
//!
//! RSV = 100 * (close - lowest_low) / (highest_high - lowest_low) over the
//! window, 0 when the window has no range.
//! K[t] = 2/3 * K[t-1] + 1/3 * RSV[t], D[t] = 2/3 * D[t-1] + 1/3 * K[t],
//! both seeded at 50. J = 3K - 2D.
//!
//! Each line is a separate `Indicator` instance named `kdj{k|d|j}{window}`.

use super::rolling::{rolling_max, rolling_min};
use super::Indicator;
use crate::domain::Candle;

const SEED: f64 = 50.0;

/// Which line of the KDJ oscillator to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdjLine {
    K,
    D,
    J,
}

impl KdjLine {
    fn letter(self) -> char {
        match self {
            KdjLine::K => 'k',
            KdjLine::D => 'd',
            KdjLine::J => 'j',
        }
    }
}

#[derive(Debug, Clone)]
pub struct Kdj {
    window: usize,
    line: KdjLine,
    name: String,
}

impl Kdj {
    pub fn new(window: usize, line: KdjLine) -> Self {
        assert!(window >= 1, "KDJ window must be >= 1");
        Self {
            window,
            line,
            name: format!("kdj{}{window}", line.letter()),
        }
    }

    /// All three lines for one window, in K, D, J order.
    pub fn lines(window: usize) -> [Kdj; 3] {
        [
            Kdj::new(window, KdjLine::K),
            Kdj::new(window, KdjLine::D),
            Kdj::new(window, KdjLine::J),
        ]
    }
}

/// Raw stochastic value per candle.
pub fn rsv(candles: &[Candle], window: usize) -> Vec<f64> {
    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
    let hh = rolling_max(&highs, window);
    let ll = rolling_min(&lows, window);

    candles
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let value = (c.close - ll[i]) / (hh[i] - ll[i]);
            if value.is_finite() {
                value * 100.0
            } else {
                0.0
            }
        })
        .collect()
}

fn smooth_thirds(values: &[f64]) -> Vec<f64> {
    let mut prev = SEED;
    values
        .iter()
        .map(|&v| {
            prev = 2.0 / 3.0 * prev + v / 3.0;
            prev
        })
        .collect()
}

impl Indicator for Kdj {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let k = smooth_thirds(&rsv(candles, self.window));
        match self.line {
            KdjLine::K => k,
            KdjLine::D => smooth_thirds(&k),
            KdjLine::J => {
                let d = smooth_thirds(&k);
                k.iter().zip(&d).map(|(k, d)| 3.0 * k - 2.0 * d).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_candles, DEFAULT_EPSILON};

    #[test]
    fn names_follow_column_convention() {
        let [k, d, j] = Kdj::lines(3);
        assert_eq!(k.name(), "kdjk3");
        assert_eq!(d.name(), "kdjd3");
        assert_eq!(j.name(), "kdjj3");
        assert_eq!(Kdj::new(14, KdjLine::D).name(), "kdjd14");
    }

    #[test]
    fn first_values_are_seeded_at_50() {
        // Candle 0: close 10 in [9, 11] → RSV 50 → K = D = J = 50
        let candles = make_candles(&[10.0]);
        for line in Kdj::lines(3) {
            assert_approx(line.compute(&candles)[0], 50.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn k_follows_recursion() {
        let candles = make_candles(&[10.0, 12.0]);
        let raw = rsv(&candles, 3);
        let k = Kdj::new(3, KdjLine::K).compute(&candles);
        let k0 = 2.0 / 3.0 * 50.0 + raw[0] / 3.0;
        let k1 = 2.0 / 3.0 * k0 + raw[1] / 3.0;
        assert_approx(k[0], k0, DEFAULT_EPSILON);
        assert_approx(k[1], k1, DEFAULT_EPSILON);
    }

    #[test]
    fn j_is_3k_minus_2d() {
        let candles = make_candles(&[10.0, 12.0, 11.0, 15.0, 14.0]);
        let k = Kdj::new(3, KdjLine::K).compute(&candles);
        let d = Kdj::new(3, KdjLine::D).compute(&candles);
        let j = Kdj::new(3, KdjLine::J).compute(&candles);
        for i in 0..candles.len() {
            assert_approx(j[i], 3.0 * k[i] - 2.0 * d[i], DEFAULT_EPSILON);
        }
    }

    #[test]
    fn flat_window_rsv_is_zero() {
        let mut candles = make_candles(&[10.0]);
        candles[0].high = 10.0;
        candles[0].low = 10.0;
        assert_eq!(rsv(&candles, 3), vec![0.0]);
    }
}
