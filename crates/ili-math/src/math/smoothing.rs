//! Centered moving-average smoothing for presentation series.

/// Centered moving average with shrinking boundaries.
///
/// The window at index `i` spans `[max(0, i-half), min(len, i+half+1))`
/// with `half = window_size / 2` (truncating division), so the first and
/// last `half` elements average over fewer samples instead of padding or
/// wrapping. The realized interior width is always `2*half + 1`, which is
/// odd; an even configured width behaves like the next larger odd width.
pub fn moving_average(window_size: usize, series: &[f64]) -> Vec<f64> {
    let half = window_size / 2;
    let mut result = Vec::with_capacity(series.len());
    for i in 0..series.len() {
        let start = i.saturating_sub(half);
        let end = (i + half + 1).min(series.len());
        let window = &series[start..end];
        let sum: f64 = window.iter().sum();
        result.push(sum / window.len() as f64);
    }
    result
}
