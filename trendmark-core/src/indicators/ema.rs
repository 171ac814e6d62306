//! Exponentially weighted averages over plain series.
//!
//! Bias-adjusted exponentially weighted mean:
//! EMA[t] = sum_k (1-alpha)^k * x[t-k] / sum_k (1-alpha)^k
//! with alpha = 2 / (span + 1). Computed recursively on the numerator and
//! denominator, so the first value equals the first input and there is no
//! warmup gap. NaN inputs decay the weights without contributing.

/// Adjusted exponentially weighted mean with smoothing factor `alpha`.
pub fn ewm_of_series(values: &[f64], alpha: f64) -> Vec<f64> {
    let decay = 1.0 - alpha;
    let mut numerator = 0.0;
    let mut denominator = 0.0;

    values
        .iter()
        .map(|&v| {
            numerator *= decay;
            denominator *= decay;
            if !v.is_nan() {
                numerator += v;
                denominator += 1.0;
            }
            if denominator > 0.0 {
                numerator / denominator
            } else {
                f64::NAN
            }
        })
        .collect()
}

/// EMA of an arbitrary series, span-parameterized. Used by MACD and TRIX.
pub fn ema_of_series(values: &[f64], span: usize) -> Vec<f64> {
    ewm_of_series(values, 2.0 / (span as f64 + 1.0))
}

/// Wilder-style smoothed moving average (alpha = 1 / period). Used by RSI.
pub fn smma_of_series(values: &[f64], period: usize) -> Vec<f64> {
    ewm_of_series(values, 1.0 / period as f64)
}
