//! Rolling-window helpers with `min_periods = 1`.
//!
//! The window for index t is `values[t+1-period..=t]`, truncated at the start
//! of the series. NaN entries are skipped; a window with no valid values
//! yields NaN.

fn window(values: &[f64], period: usize, t: usize) -> &[f64] {
    let start = (t + 1).saturating_sub(period);
    &values[start..=t]
}

/// Rolling mean.
pub fn rolling_mean(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "rolling period must be >= 1");
    (0..values.len())
        .map(|t| {
            let (sum, count) = window(values, period, t)
                .iter()
                .filter(|v| !v.is_nan())
                .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
            if count == 0 {
                f64::NAN
            } else {
                sum / count as f64
            }
        })
        .collect()
}

/// Rolling maximum.
pub fn rolling_max(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "rolling period must be >= 1");
    (0..values.len())
        .map(|t| {
            let w = window(values, period, t);
            if w.iter().all(|v| v.is_nan()) {
                f64::NAN
            } else {
                w.iter().copied().fold(f64::NEG_INFINITY, f64::max)
            }
        })
        .collect()
}

/// Rolling minimum.
pub fn rolling_min(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "rolling period must be >= 1");
    (0..values.len())
        .map(|t| {
            let w = window(values, period, t);
            if w.iter().all(|v| v.is_nan()) {
                f64::NAN
            } else {
                w.iter().copied().fold(f64::INFINITY, f64::min)
            }
        })
        .collect()
}

/// Rolling mean absolute deviation around the window mean.
pub fn rolling_mean_deviation(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "rolling period must be >= 1");
    (0..values.len())
        .map(|t| {
            let valid: Vec<f64> = window(values, period, t)
                .iter()
                .copied()
                .filter(|v| !v.is_nan())
                .collect();
            if valid.is_empty() {
                return f64::NAN;
            }
            let mean = valid.iter().sum::<f64>() / valid.len() as f64;
            valid.iter().map(|v| (v - mean).abs()).sum::<f64>() / valid.len() as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn mean_uses_partial_window_at_start() {
        let result = rolling_mean(&[2.0, 4.0, 6.0, 8.0], 3);
        assert_approx(result[0], 2.0, DEFAULT_EPSILON);
        assert_approx(result[1], 3.0, DEFAULT_EPSILON);
        assert_approx(result[2], 4.0, DEFAULT_EPSILON);
        assert_approx(result[3], 6.0, DEFAULT_EPSILON);
    }

    #[test]
    fn max_and_min_track_window() {
        let data = [3.0, 1.0, 4.0, 1.0, 5.0];
        assert_eq!(rolling_max(&data, 2), vec![3.0, 3.0, 4.0, 4.0, 5.0]);
        assert_eq!(rolling_min(&data, 2), vec![3.0, 1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn nan_is_skipped() {
        let data = [1.0, f64::NAN, 3.0];
        assert_approx(rolling_mean(&data, 3)[2], 2.0, DEFAULT_EPSILON);
        assert_eq!(rolling_max(&data, 2)[1], 1.0);
        assert!(rolling_mean(&[f64::NAN], 3)[0].is_nan());
    }

    #[test]
    fn mean_deviation_known_value() {
        // window [1, 2, 3]: mean 2, |dev| = 1, 0, 1 → 2/3
        let result = rolling_mean_deviation(&[1.0, 2.0, 3.0], 3);
        assert_approx(result[2], 2.0 / 3.0, DEFAULT_EPSILON);
        assert_approx(result[0], 0.0, DEFAULT_EPSILON);
    }
}
