//! Trading signal: normalized price magnitude shifted by the trend label.
//!
//! `signal = 0.5 * normalized_close (+ 0.5 when the label is Up)`, so flat
//! and down steps land in [0, 0.5] and up steps in [0.5, 1].

use crate::domain::TrendLabel;
use crate::error::LabelError;
use crate::labeling::normalize::normalize;

/// Weight of the normalized close price in the signal.
pub const MAGNITUDE_WEIGHT: f64 = 0.5;

/// Shift applied on up-trend steps.
pub const UP_TREND_BONUS: f64 = 0.5;

/// Signal for a single step.
pub fn signal_value(normalized_close: f64, label: TrendLabel) -> f64 {
    let base = normalized_close * MAGNITUDE_WEIGHT;
    if label.is_up() {
        base + UP_TREND_BONUS
    } else {
        base
    }
}

/// Blend an already-normalized close series with the labels.
pub fn blend(normalized_close: &[f64], labels: &[TrendLabel]) -> Result<Vec<f64>, LabelError> {
    if labels.len() != normalized_close.len() {
        return Err(LabelError::LengthMismatch {
            column: "trend".into(),
            expected: normalized_close.len(),
            actual: labels.len(),
        });
    }
    Ok(normalized_close
        .iter()
        .zip(labels)
        .map(|(&n, &label)| signal_value(n, label))
        .collect())
}

/// Normalize the close series and blend it with the labels.
pub fn trading_signals(close: &[f64], labels: &[TrendLabel]) -> Result<Vec<f64>, LabelError> {
    blend(&normalize(close), labels)
}
