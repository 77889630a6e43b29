//! Validated prior probability vectors.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::PROB_SUM_TOLERANCE;

/// Probability distribution over the configured disease categories,
/// index-aligned with the [`DiseaseSet`](crate::DiseaseSet).
///
/// Invariants enforced at construction: every entry is strictly positive
/// and finite, and the entries sum to 1 within [`PROB_SUM_TOLERANCE`].
/// Updates replace the whole vector; entries are never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct PriorVector {
    probabilities: Vec<f64>,
}

impl PriorVector {
    /// Create a prior vector, validating positivity and normalization.
    pub fn new(probabilities: Vec<f64>) -> Result<Self> {
        if probabilities.len() < 2 {
            return Err(Error::InvalidConfiguration(format!(
                "prior vector needs at least 2 entries, got {}",
                probabilities.len()
            )));
        }
        for (i, &p) in probabilities.iter().enumerate() {
            if !p.is_finite() || p <= 0.0 {
                return Err(Error::InvalidConfiguration(format!(
                    "prior entry {i} is {p}; every prior must be finite and > 0"
                )));
            }
        }
        let total: f64 = probabilities.iter().sum();
        if (total - 1.0).abs() > PROB_SUM_TOLERANCE {
            return Err(Error::InvalidConfiguration(format!(
                "prior vector sums to {total}, expected 1 within {PROB_SUM_TOLERANCE}"
            )));
        }
        Ok(Self { probabilities })
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// Always false: construction guarantees at least two entries.
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Probabilities in disease order.
    pub fn as_slice(&self) -> &[f64] {
        &self.probabilities
    }

    /// Natural-log of every entry, in disease order.
    pub fn ln_entries(&self) -> Vec<f64> {
        self.probabilities.iter().map(|p| p.ln()).collect()
    }

    /// Consume the vector, returning the raw probabilities.
    pub fn into_inner(self) -> Vec<f64> {
        self.probabilities
    }
}

impl TryFrom<Vec<f64>> for PriorVector {
    type Error = Error;

    fn try_from(probabilities: Vec<f64>) -> Result<Self> {
        PriorVector::new(probabilities)
    }
}

impl From<PriorVector> for Vec<f64> {
    fn from(prior: PriorVector) -> Self {
        prior.probabilities
    }
}
