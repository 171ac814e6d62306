//! Validated, index-aligned input columns for the labeling engine.

use serde::{Deserialize, Serialize};

use crate::error::LabelError;
use crate::labeling::TREND_WINDOW;

/// A named numeric column (e.g. `rsi_14`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSeries {
    pub name: String,
    pub values: Vec<f64>,
}

impl NamedSeries {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Close price, its moving average and the reporting indicators.
///
/// Construction is the only place alignment is checked: every column must
/// have the same length as `close`, and the series must be long enough for
/// one full trend window.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelInput {
    close: Vec<f64>,
    average: NamedSeries,
    indicators: Vec<NamedSeries>,
}

impl LabelInput {
    pub fn new(
        close: Vec<f64>,
        average: NamedSeries,
        indicators: Vec<NamedSeries>,
    ) -> Result<Self, LabelError> {
        let expected = close.len();
        for series in std::iter::once(&average).chain(indicators.iter()) {
            if series.len() != expected {
                return Err(LabelError::LengthMismatch {
                    column: series.name.clone(),
                    expected,
                    actual: series.len(),
                });
            }
        }
        if expected < TREND_WINDOW {
            return Err(LabelError::SeriesTooShort {
                len: expected,
                required: TREND_WINDOW,
            });
        }
        Ok(Self {
            close,
            average,
            indicators,
        })
    }

    pub fn close(&self) -> &[f64] {
        &self.close
    }

    pub fn average(&self) -> &NamedSeries {
        &self.average
    }

    pub fn indicators(&self) -> &[NamedSeries] {
        &self.indicators
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    /// Always false: construction rejects series shorter than a trend window.
    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }
}
