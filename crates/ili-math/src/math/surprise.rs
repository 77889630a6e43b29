//! Empirical p-values for daily model-fit anomaly scoring.

/// One-sided empirical rank statistic over a trailing window.
///
/// For each day `d`, compares `series[d]` against the up-to-`window_size`
/// most recent values strictly before `d` and returns the fraction of the
/// window that is smaller. A low p-value means the day's log-evidence is
/// unusually small relative to recent history (worse model fit, a candidate
/// outbreak or shift signal).
///
/// Days with `d <= min_window_size` have too little history and come back
/// as NaN. The boundary is inclusive, so `min_window_size + 1` leading days
/// are undefined. The window never includes day `d` itself and is rebuilt
/// from scratch each day.
pub fn empirical_p(window_size: usize, min_window_size: usize, series: &[f64]) -> Vec<f64> {
    let mut result = Vec::with_capacity(series.len());
    for day in 0..series.len() {
        if day <= min_window_size {
            result.push(f64::NAN);
            continue;
        }
        let start = day.saturating_sub(window_size);
        let window = &series[start..day];
        if window.is_empty() {
            result.push(f64::NAN);
            continue;
        }
        let below = window.iter().filter(|&&x| x < series[day]).count();
        result.push(below as f64 / window.len() as f64);
    }
    result
}
