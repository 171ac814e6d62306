//! Per-index trend classification.
//!
//! Index `idx` is judged on the window ending at `max(idx, 4)`, i.e. starting
//! at `max(idx, 4) - 4`. Indices 0 through 3 therefore share the window
//! anchored at 0.

use crate::domain::TrendLabel;
use crate::error::LabelError;
use crate::labeling::trend::{close_trend, sma_trend, Placement, Slope, TREND_WINDOW};

/// Steps reached backward from an index before a trend decision.
pub const LOOKBACK: usize = TREND_WINDOW - 1;

/// First index of the trend window used for `idx`.
pub fn window_start(idx: usize) -> usize {
    idx.max(LOOKBACK) - LOOKBACK
}

/// Combine the two detector verdicts into a label.
pub fn combine(slope: Slope, placement: Placement) -> TrendLabel {
    match (slope, placement) {
        (Slope::Rising, Placement::Leading) => TrendLabel::Up,
        (Slope::Falling, Placement::Lagging) => TrendLabel::Down,
        _ => TrendLabel::Flat,
    }
}

/// Label a single index.
pub fn classify_at(close: &[f64], average: &[f64], idx: usize) -> Result<TrendLabel, LabelError> {
    let start = window_start(idx);
    let slope = sma_trend(average, start)?;
    let placement = close_trend(close, average, start)?;
    Ok(combine(slope, placement))
}

/// Label every index of the series.
///
/// Fails fast on misaligned columns or a series shorter than one trend
/// window; no partial window is ever evaluated.
pub fn classify_trends(close: &[f64], average: &[f64]) -> Result<Vec<TrendLabel>, LabelError> {
    if average.len() != close.len() {
        return Err(LabelError::LengthMismatch {
            column: "average".into(),
            expected: close.len(),
            actual: average.len(),
        });
    }
    if close.len() < TREND_WINDOW {
        return Err(LabelError::SeriesTooShort {
            len: close.len(),
            required: TREND_WINDOW,
        });
    }

    (0..close.len())
        .map(|idx| classify_at(close, average, idx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_start_clamps_first_indices() {
        assert_eq!(window_start(0), 0);
        assert_eq!(window_start(3), 0);
        assert_eq!(window_start(4), 0);
        assert_eq!(window_start(5), 1);
        assert_eq!(window_start(10), 6);
    }

    #[test]
    fn combine_truth_table() {
        assert_eq!(combine(Slope::Rising, Placement::Leading), TrendLabel::Up);
        assert_eq!(combine(Slope::Falling, Placement::Lagging), TrendLabel::Down);
        assert_eq!(combine(Slope::Rising, Placement::Lagging), TrendLabel::Flat);
        assert_eq!(combine(Slope::Falling, Placement::Leading), TrendLabel::Flat);
        assert_eq!(combine(Slope::Neutral, Placement::Leading), TrendLabel::Flat);
        assert_eq!(combine(Slope::Rising, Placement::Neutral), TrendLabel::Flat);
    }

    #[test]
    fn rising_average_with_price_above_is_up() {
        let avg: Vec<f64> = (0..8).map(|i| 10.0 + i as f64).collect();
        let close: Vec<f64> = avg.iter().map(|a| a + 1.0).collect();
        let labels = classify_trends(&close, &avg).unwrap();
        assert!(labels.iter().all(|&l| l == TrendLabel::Up));
    }

    #[test]
    fn falling_average_with_price_below_is_down() {
        let avg: Vec<f64> = (0..8).map(|i| 50.0 - i as f64).collect();
        let close: Vec<f64> = avg.iter().map(|a| a - 2.0).collect();
        let labels = classify_trends(&close, &avg).unwrap();
        assert!(labels.iter().all(|&l| l == TrendLabel::Down));
    }

    #[test]
    fn first_four_indices_share_a_label() {
        let avg = [1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0, 2.0];
        let close = [2.0, 3.0, 4.0, 5.0, 6.0, 3.0, 2.0, 1.0];
        let labels = classify_trends(&close, &avg).unwrap();
        assert_eq!(labels[0], TrendLabel::Up);
        assert_eq!(&labels[0..4], &[labels[0]; 4]);
        assert_eq!(labels[4], TrendLabel::Up);
        // Window [1, 5] contains the turn → flat.
        assert_eq!(labels[5], TrendLabel::Flat);
    }

    #[test]
    fn last_index_uses_window_ending_at_it() {
        let avg = [5.0, 5.0, 5.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let close = [5.0, 5.0, 5.0, 5.0, 7.0, 8.0, 9.0, 10.0, 11.0];
        let labels = classify_trends(&close, &avg).unwrap();
        assert_eq!(labels[8], TrendLabel::Up);
        assert_eq!(classify_at(&close, &avg, 8), Ok(TrendLabel::Up));
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = classify_trends(&[1.0; 6], &[1.0; 5]).unwrap_err();
        assert!(matches!(err, LabelError::LengthMismatch { expected: 6, actual: 5, .. }));
    }

    #[test]
    fn rejects_short_series() {
        let err = classify_trends(&[1.0; 4], &[1.0; 4]).unwrap_err();
        assert_eq!(err, LabelError::SeriesTooShort { len: 4, required: 5 });
    }

    #[test]
    fn exactly_five_points_is_enough() {
        let labels = classify_trends(&[1.0; 5], &[1.0; 5]).unwrap();
        assert_eq!(labels, vec![TrendLabel::Flat; 5]);
    }
}
