//! Indicator columns computed from OHLCV candles.
//!
//! These feed the enrichment step that produces the moving average the trend
//! classifier reads (`close_15_sma`) and the reporting columns that are only
//! normalized (`macd`, `rsi_14`, `wr_14`, KDJ lines, `trix`, `adx`, `cci`).
//!
//! Conventions follow the usual dataframe-library definitions: rolling
//! windows use `min_periods = 1` (a partial window at the start of the
//! series), and exponential averages are the bias-adjusted weighted form, so
//! most columns have a value from the first row. Multi-line indicators (KDJ)
//! are exposed as separate named instances per line, keeping the
//! single-series `Indicator` trait unchanged.

pub mod adx;
pub mod atr;
pub mod cci;
pub mod ema;
pub mod kdj;
pub mod macd;
pub mod rolling;
pub mod rsi;
pub mod sma;
pub mod trix;
pub mod williams_r;

pub use adx::Adx;
pub use cci::Cci;
pub use kdj::{Kdj, KdjLine};
pub use macd::Macd;
pub use rsi::Rsi;
pub use sma::Sma;
pub use trix::Trix;
pub use williams_r::WilliamsR;

use crate::domain::Candle;

/// Trait for indicators.
///
/// Indicators are pure functions: candle history in, numeric column out,
/// one value per candle. The value at index t never depends on candles after t.
pub trait Indicator: Send + Sync {
    /// Column name (e.g., "rsi_14", "kdjk3").
    fn name(&self) -> &str;

    /// Compute the indicator for the entire candle series.
    ///
    /// Returns a `Vec<f64>` of the same length as `candles`.
    fn compute(&self, candles: &[Candle]) -> Vec<f64>;
}

/// Extract the close column.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

/// Create synthetic candles from close prices for testing.
///
/// Generates plausible OHLC: open = prev_close (or close for first candle),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0.
#[cfg(test)]
pub fn make_candles(closes: &[f64]) -> Vec<Candle> {
    let base = chrono::NaiveDate::from_ymd_opt(2018, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Candle {
                datetime: base + chrono::Duration::days(i as i64),
                low: open.min(close) - 1.0,
                high: open.max(close) + 1.0,
                open,
                close,
                volume_from: 10.0,
                volume_to: 10.0 * close,
            }
        })
        .collect()
}

/// Create candles from explicit (open, high, low, close) tuples for testing.
#[cfg(test)]
pub fn make_ohlc_candles(data: &[(f64, f64, f64, f64)]) -> Vec<Candle> {
    let base = chrono::NaiveDate::from_ymd_opt(2018, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| Candle {
            datetime: base + chrono::Duration::days(i as i64),
            low,
            high,
            open,
            close,
            volume_from: 1.0,
            volume_to: close,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for numeric tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
