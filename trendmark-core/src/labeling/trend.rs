//! Fixed-window trend detectors.
//!
//! Both detectors read the 5-point window `[start, start + 4]` and count
//! consecutive agreeing comparisons. A strict move in one direction resets
//! the opposing counter; a tie advances both. Incomparable pairs (NaN) are
//! treated as ties. A decisive result needs one counter to complete the
//! window while the other does not, so a window made only of ties is neutral.

use std::cmp::Ordering;

use crate::error::LabelError;

/// Number of points in a trend window.
pub const TREND_WINDOW: usize = 5;

/// Short-term direction of the moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slope {
    Rising,
    Falling,
    Neutral,
}

impl Slope {
    pub fn as_i8(self) -> i8 {
        match self {
            Slope::Rising => 1,
            Slope::Falling => -1,
            Slope::Neutral => 0,
        }
    }
}

/// Where price sits relative to its moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Price above its average at every point of the window.
    Leading,
    /// Price below its average at every point of the window.
    Lagging,
    Neutral,
}

impl Placement {
    pub fn as_i8(self) -> i8 {
        match self {
            Placement::Leading => 1,
            Placement::Lagging => -1,
            Placement::Neutral => 0,
        }
    }
}

/// Up/down streak counter shared by both detectors.
#[derive(Debug, Default)]
struct Streak {
    up: usize,
    down: usize,
}

impl Streak {
    /// `ord` is the ordering of the "lower" side against the "upper" side:
    /// `Less` counts as up, `Greater` as down.
    fn push(&mut self, ord: Option<Ordering>) {
        match ord {
            Some(Ordering::Less) => {
                self.up += 1;
                self.down = 0;
            }
            Some(Ordering::Greater) => {
                self.down += 1;
                self.up = 0;
            }
            _ => {
                self.up += 1;
                self.down += 1;
            }
        }
    }

    /// `Some(true)` for a complete up streak, `Some(false)` for a complete
    /// down streak, `None` when neither or both completed.
    fn verdict(&self, steps: usize) -> Option<bool> {
        match (self.up == steps, self.down == steps) {
            (true, false) => Some(true),
            (false, true) => Some(false),
            _ => None,
        }
    }
}

fn trend_window(series: &[f64], start: usize) -> Result<&[f64], LabelError> {
    start
        .checked_add(TREND_WINDOW)
        .and_then(|end| series.get(start..end))
        .ok_or(LabelError::WindowOutOfBounds {
            start,
            end: start.saturating_add(TREND_WINDOW - 1),
            len: series.len(),
        })
}

/// Classify the moving average over `[start, start + 4]` from its 4 pairwise steps.
pub fn sma_trend(average: &[f64], start: usize) -> Result<Slope, LabelError> {
    let window = trend_window(average, start)?;
    let mut streak = Streak::default();
    for pair in window.windows(2) {
        streak.push(pair[0].partial_cmp(&pair[1]));
    }

    Ok(match streak.verdict(TREND_WINDOW - 1) {
        Some(true) => Slope::Rising,
        Some(false) => Slope::Falling,
        None => Slope::Neutral,
    })
}

/// Classify price against its average over the 5 points of `[start, start + 4]`.
pub fn close_trend(close: &[f64], average: &[f64], start: usize) -> Result<Placement, LabelError> {
    let close_window = trend_window(close, start)?;
    let average_window = trend_window(average, start)?;
    let mut streak = Streak::default();
    for (avg, price) in average_window.iter().zip(close_window) {
        // avg < price means price leads.
        streak.push(avg.partial_cmp(price));
    }

    Ok(match streak.verdict(TREND_WINDOW) {
        Some(true) => Placement::Leading,
        Some(false) => Placement::Lagging,
        None => Placement::Neutral,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strictly_increasing_average_is_rising() {
        assert_eq!(sma_trend(&[1.0, 2.0, 3.0, 4.0, 5.0], 0), Ok(Slope::Rising));
    }

    #[test]
    fn strictly_decreasing_average_is_falling() {
        assert_eq!(sma_trend(&[5.0, 4.0, 3.0, 2.0, 1.0], 0), Ok(Slope::Falling));
    }

    #[test]
    fn all_ties_are_neutral() {
        assert_eq!(sma_trend(&[3.0; 5], 0), Ok(Slope::Neutral));
    }

    #[test]
    fn ties_count_towards_a_rise() {
        // < = < <: rise reaches 4, fall is reset by the strict rises.
        assert_eq!(sma_trend(&[1.0, 2.0, 2.0, 3.0, 4.0], 0), Ok(Slope::Rising));
    }

    #[test]
    fn trailing_ties_after_a_rise_still_rise() {
        // < = = =: rise 4, fall 3.
        assert_eq!(sma_trend(&[1.0, 2.0, 2.0, 2.0, 2.0], 0), Ok(Slope::Rising));
    }

    #[test]
    fn single_reversal_breaks_the_streak() {
        assert_eq!(sma_trend(&[1.0, 2.0, 1.5, 3.0, 4.0], 0), Ok(Slope::Neutral));
    }

    #[test]
    fn nan_compares_as_tie() {
        assert_eq!(sma_trend(&[f64::NAN; 5], 0), Ok(Slope::Neutral));
        assert_eq!(
            sma_trend(&[1.0, 2.0, f64::NAN, 3.0, 4.0], 0),
            Ok(Slope::Rising)
        );
    }

    #[test]
    fn sma_trend_reads_window_at_start() {
        let avg = [9.0, 8.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(sma_trend(&avg, 0), Ok(Slope::Neutral));
        assert_eq!(sma_trend(&avg, 2), Ok(Slope::Rising));
    }

    #[test]
    fn sma_trend_rejects_overrun() {
        let err = sma_trend(&[1.0, 2.0, 3.0, 4.0, 5.0], 1).unwrap_err();
        assert_eq!(
            err,
            LabelError::WindowOutOfBounds {
                start: 1,
                end: 5,
                len: 5
            }
        );
    }

    #[test]
    fn price_above_average_is_leading() {
        let close = [2.0, 3.0, 4.0, 5.0, 6.0];
        let avg = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(close_trend(&close, &avg, 0), Ok(Placement::Leading));
    }

    #[test]
    fn price_below_average_is_lagging() {
        let close = [1.0, 2.0, 3.0, 4.0, 5.0];
        let avg = [2.0, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(close_trend(&close, &avg, 0), Ok(Placement::Lagging));
    }

    #[test]
    fn price_equal_to_average_is_neutral() {
        let series = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(close_trend(&series, &series, 0), Ok(Placement::Neutral));
    }

    #[test]
    fn one_cross_in_window_is_neutral() {
        let close = [2.0, 3.0, 2.0, 5.0, 6.0];
        let avg = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(close_trend(&close, &avg, 0), Ok(Placement::Neutral));
    }

    #[test]
    fn touching_the_average_keeps_leading() {
        // > > > > =: lead 5, lag 1.
        let close = [2.0, 3.0, 4.0, 5.0, 5.0];
        let avg = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(close_trend(&close, &avg, 0), Ok(Placement::Leading));
    }

    #[test]
    fn close_trend_rejects_short_close() {
        let close = [1.0, 2.0, 3.0, 4.0];
        let avg = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!(matches!(
            close_trend(&close, &avg, 0),
            Err(LabelError::WindowOutOfBounds { len: 4, .. })
        ));
    }

    #[test]
    fn signed_values() {
        assert_eq!(Slope::Rising.as_i8(), 1);
        assert_eq!(Slope::Falling.as_i8(), -1);
        assert_eq!(Placement::Neutral.as_i8(), 0);
        assert_eq!(Placement::Lagging.as_i8(), -1);
    }
}
