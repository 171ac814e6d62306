//! Forward-window min-max normalization.
//!
//! Each index is scaled against the window `data[i..=i+2]`, clipped at the
//! tail of the series so it never reads past the end. The outcome of a
//! single window is explicit: a scaled value, a degenerate (flat) window, or
//! an undefined result from non-finite input. Columns written to disk carry
//! `0.0` for both of the latter.

/// Width of the forward window, including the current index.
pub const NORMALIZE_WINDOW: usize = 3;

/// Outcome of normalizing one index against its forward window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalized {
    /// `(x - min) / (max - min)`, within [0, 1].
    Scaled(f64),
    /// Every value in the window is equal; the range is zero.
    Degenerate,
    /// NaN or infinite arithmetic (non-finite input).
    Undefined,
}

impl Normalized {
    /// Value used in output columns: the scaled value, otherwise `0.0`.
    pub fn value(self) -> f64 {
        match self {
            Normalized::Scaled(v) => v,
            Normalized::Degenerate | Normalized::Undefined => 0.0,
        }
    }

    pub fn is_degenerate(self) -> bool {
        matches!(self, Normalized::Degenerate)
    }
}

/// Normalize `data[index]` against the forward window starting at `index`.
///
/// An index past the end of `data` yields `Undefined`.
pub fn normalize_window(data: &[f64], index: usize) -> Normalized {
    let end = index.saturating_add(NORMALIZE_WINDOW).min(data.len());
    let window = match data.get(index..end) {
        Some(w) if !w.is_empty() => w,
        _ => return Normalized::Undefined,
    };

    let lo = window.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = hi - lo;

    if range == 0.0 {
        return Normalized::Degenerate;
    }
    if !range.is_finite() {
        return Normalized::Undefined;
    }

    let scaled = (window[0] - lo) / range;
    if scaled.is_finite() {
        Normalized::Scaled(scaled)
    } else {
        Normalized::Undefined
    }
}

/// Per-index window outcomes for the whole series.
pub fn normalize_outcomes(data: &[f64]) -> Vec<Normalized> {
    (0..data.len()).map(|i| normalize_window(data, i)).collect()
}

/// Normalize a whole series. Output has the same length as `data`.
///
/// This is the only normalization routine in the crate: reported columns and
/// the trading signal's price term both go through it.
pub fn normalize(data: &[f64]) -> Vec<f64> {
    (0..data.len())
        .map(|i| normalize_window(data, i).value())
        .collect()
}
