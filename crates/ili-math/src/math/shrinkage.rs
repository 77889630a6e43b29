//! Dirichlet-style pseudo-count shrinkage for day-over-day prior updates.
//!
//! The model treats the baseline priors, scaled by an equivalent sample
//! size, as pseudo-counts blended with one day's observed expected counts:
//!
//! `raw_i = (expected_i + ess * baseline_i) / (total_expected + ess)`
//!
//! which is the posterior mean of a Dirichlet-multinomial model. The result
//! is then floored and renormalized so every category keeps strictly
//! positive mass.

use serde::{Deserialize, Serialize};

const PROB_SUM_TOLERANCE: f64 = 1e-6;

/// Parameters of the shrinkage update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shrinkage {
    /// Pseudo-count strength of the baseline priors ("virtual patients").
    pub equivalent_sample_size: f64,
    /// Minimum mass added to every category before renormalizing.
    pub floor: f64,
}

impl Shrinkage {
    /// Create shrinkage parameters with validation.
    ///
    /// Returns None if either parameter is non-positive or non-finite.
    pub fn new(equivalent_sample_size: f64, floor: f64) -> Option<Self> {
        if !equivalent_sample_size.is_finite() || equivalent_sample_size <= 0.0 {
            return None;
        }
        if !floor.is_finite() || floor <= 0.0 {
            return None;
        }
        Some(Self {
            equivalent_sample_size,
            floor,
        })
    }

    /// Blend one day's expected counts with the baseline priors and
    /// floor-normalize into the next day's prior.
    ///
    /// Returns None if the slices disagree in length, `baseline` is not a
    /// positive vector summing to 1, or `expected` contains a negative or
    /// non-finite entry. Output sums to 1 exactly and every entry is
    /// >= floor / (total + n * floor) > 0.
    pub fn update(&self, expected: &[f64], baseline: &[f64]) -> Option<Vec<f64>> {
        if expected.len() != baseline.len() || expected.is_empty() {
            return None;
        }
        for &b in baseline {
            if !b.is_finite() || b <= 0.0 {
                return None;
            }
        }
        let baseline_total: f64 = baseline.iter().sum();
        if (baseline_total - 1.0).abs() > PROB_SUM_TOLERANCE {
            return None;
        }
        for &e in expected {
            if !e.is_finite() || e < 0.0 {
                return None;
            }
        }

        let total: f64 = expected.iter().sum();
        let ess = self.equivalent_sample_size;
        let raw: Vec<f64> = expected
            .iter()
            .zip(baseline)
            .map(|(&e, &b)| (e + ess * b) / (total + ess))
            .collect();
        Some(floor_normalize(&raw, self.floor))
    }
}

/// Add `floor` to every entry and renormalize by the floored total.
///
/// Guarantees strictly positive output summing to 1 for non-negative input.
pub fn floor_normalize(values: &[f64], floor: f64) -> Vec<f64> {
    let floored: Vec<f64> = values.iter().map(|v| v + floor).collect();
    let total: f64 = floored.iter().sum();
    floored.iter().map(|v| v / total).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn vec_approx_eq(a: &[f64], b: &[f64], tol: f64) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| approx_eq(x, y, tol))
    }

    #[test]
    fn new_rejects_invalid_parameters() {
        assert!(Shrinkage::new(0.0, 1e-4).is_none());
        assert!(Shrinkage::new(-1.0, 1e-4).is_none());
        assert!(Shrinkage::new(f64::NAN, 1e-4).is_none());
        assert!(Shrinkage::new(10.0, 0.0).is_none());
        assert!(Shrinkage::new(10.0, f64::INFINITY).is_none());
        assert!(Shrinkage::new(10.0, 1e-4).is_some());
    }

    #[test]
    fn matching_counts_leave_prior_unchanged() {
        // ess=10, baseline [0.5, 0.5], expected [1, 1] over 2 patients:
        // raw = [(1+5)/(2+10), (1+5)/(2+10)] = [0.5, 0.5].
        let shrinkage = Shrinkage::new(10.0, 1e-4).unwrap();
        let out = shrinkage.update(&[1.0, 1.0], &[0.5, 0.5]).unwrap();
        assert!(vec_approx_eq(&out, &[0.5, 0.5], 1e-12));
    }

    #[test]
    fn large_ess_pins_to_baseline() {
        let shrinkage = Shrinkage::new(1e12, 1e-9).unwrap();
        let out = shrinkage.update(&[10.0, 0.0], &[0.3, 0.7]).unwrap();
        assert!(vec_approx_eq(&out, &[0.3, 0.7], 1e-6));
    }

    #[test]
    fn small_ess_approaches_maximum_likelihood() {
        let shrinkage = Shrinkage::new(1e-9, 1e-12).unwrap();
        let out = shrinkage.update(&[3.0, 1.0], &[0.5, 0.5]).unwrap();
        assert!(vec_approx_eq(&out, &[0.75, 0.25], 1e-6));
    }

    #[test]
    fn output_respects_floor() {
        // One category gets essentially zero evidence and a tiny baseline;
        // the floor still keeps it above the guaranteed bound.
        let floor = 1e-4;
        let shrinkage = Shrinkage::new(0.001, floor).unwrap();
        let out = shrinkage.update(&[100.0, 0.0], &[0.999, 0.001]).unwrap();
        let n = out.len() as f64;
        let bound = floor / (1.0 + n * floor);
        assert!(out[1] >= bound);
        assert!(approx_eq(out.iter().sum::<f64>(), 1.0, 1e-12));
    }

    #[test]
    fn update_rejects_bad_inputs() {
        let shrinkage = Shrinkage::new(10.0, 1e-4).unwrap();
        // Length mismatch.
        assert!(shrinkage.update(&[1.0], &[0.5, 0.5]).is_none());
        // Baseline not a distribution.
        assert!(shrinkage.update(&[1.0, 1.0], &[0.5, 0.6]).is_none());
        assert!(shrinkage.update(&[1.0, 1.0], &[0.0, 1.0]).is_none());
        // Negative expected count.
        assert!(shrinkage.update(&[-1.0, 1.0], &[0.5, 0.5]).is_none());
        // Empty.
        assert!(shrinkage.update(&[], &[]).is_none());
    }

    #[test]
    fn floor_normalize_sums_to_one() {
        let out = floor_normalize(&[0.0, 1.0, 3.0], 0.5);
        assert!(approx_eq(out.iter().sum::<f64>(), 1.0, 1e-12));
        assert!(out.iter().all(|&p| p > 0.0));
        // [0.5, 1.5, 3.5] / 5.5
        assert!(vec_approx_eq(&out, &[0.5 / 5.5, 1.5 / 5.5, 3.5 / 5.5], 1e-12));
    }
}
