//! Numerically stable primitives for log-domain Bayesian math.
//!
//! All multiplicative combination of likelihoods stays in log-space; only
//! bounded posteriors in [0, 1] are ever exponentiated.

/// Stable log(sum(exp(values))), as a pairwise [`log_add_exp`] fold.
///
/// Order-independent up to floating error. Returns NEG_INFINITY for empty
/// input or all -inf inputs; NaN inputs propagate.
pub fn log_sum_exp(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, log_add_exp)
}

/// Stable log(exp(a) + exp(b)).
pub fn log_add_exp(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        return f64::NAN;
    }
    if a == f64::NEG_INFINITY {
        return b;
    }
    if b == f64::NEG_INFINITY {
        return a;
    }
    if a == f64::INFINITY || b == f64::INFINITY {
        return f64::INFINITY;
    }
    let m = a.max(b);
    let diff = (a - b).abs();
    m + (-diff).exp().ln_1p()
}

/// Convert a logarithm stored in `base` into natural-log units.
///
/// Upstream classifiers emit base-10 scores; the tracker works in nats.
/// Dividing by log_base(e) is the exact inverse of the encoding.
pub fn ln_from_base(value: f64, base: f64) -> f64 {
    value / std::f64::consts::E.log(base)
}

/// Normalize log-probabilities into linear-space probabilities summing to 1.
///
/// Returns the probabilities together with the log normalizer
/// log(sum(exp(log_probs))), or None for empty input or a non-finite
/// normalizer (all entries -inf, or an overflowing +inf).
pub fn normalize_log_probs(log_probs: &[f64]) -> Option<(Vec<f64>, f64)> {
    if log_probs.is_empty() {
        return None;
    }
    let denominator = log_sum_exp(log_probs);
    if !denominator.is_finite() {
        return None;
    }
    let probs = log_probs.iter().map(|lp| (lp - denominator).exp()).collect();
    Some((probs, denominator))
}
