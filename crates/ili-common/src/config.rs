//! Tracker configuration.
//!
//! A single immutable value supplied at construction; no process-wide
//! defaults. Validation happens once, before any day is processed.

use serde::{Deserialize, Serialize};

use crate::disease::DiseaseSet;
use crate::error::{Error, Result};
use crate::{DEFAULT_PRIOR_FLOOR, PROB_SUM_TOLERANCE};

fn default_equivalent_sample_size() -> f64 {
    10.0
}

fn default_base() -> f64 {
    10.0
}

fn default_moving_average_window() -> usize {
    7
}

fn default_anomaly_window_size() -> usize {
    28
}

fn default_anomaly_min_window_size() -> usize {
    7
}

fn default_prior_floor() -> f64 {
    DEFAULT_PRIOR_FLOOR
}

/// Complete tracker configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Ordered disease labels; the last one is the residual category.
    pub diseases: DiseaseSet,

    /// Baseline probability per disease, index-aligned with `diseases`.
    /// The residual entry is ignored as written and recomputed as
    /// `1 - sum(others)`; see [`baseline_priors`](Self::baseline_priors).
    pub original_priors: Vec<f64>,

    /// Patient field holding each disease's log-likelihood score,
    /// index-aligned with `diseases`.
    pub log_likelihood_fields: Vec<String>,

    /// Pseudo-count strength of the baseline priors (> 0).
    #[serde(default = "default_equivalent_sample_size")]
    pub equivalent_sample_size: f64,

    /// Logarithm base the stored log-likelihoods are encoded in (> 0, != 1).
    #[serde(default = "default_base")]
    pub base: f64,

    /// Centered moving-average width for presentation smoothing.
    #[serde(default = "default_moving_average_window")]
    pub moving_average_window: usize,

    /// Trailing window for the empirical p-value statistic.
    #[serde(default = "default_anomaly_window_size")]
    pub anomaly_window_size: usize,

    /// Days of history required before a p-value is defined.
    #[serde(default = "default_anomaly_min_window_size")]
    pub anomaly_min_window_size: usize,

    /// Minimum mass any disease keeps after a prior update.
    #[serde(default = "default_prior_floor")]
    pub prior_floor: f64,
}

impl TrackerConfig {
    /// Configuration with the stock prior split: total mass 0.1 spread
    /// evenly over the named syndromes, 0.9 on the residual, and one
    /// `<LABEL>_loglikelihood_T` field per disease.
    pub fn with_default_priors(diseases: DiseaseSet) -> Self {
        let n = diseases.len();
        let residual = diseases.residual_index();
        let original_priors = (0..n)
            .map(|i| {
                if i == residual {
                    0.9
                } else {
                    0.1 / (n as f64 - 1.0)
                }
            })
            .collect();
        let log_likelihood_fields = diseases
            .iter()
            .map(|label| format!("{label}_loglikelihood_T"))
            .collect();
        Self {
            diseases,
            original_priors,
            log_likelihood_fields,
            equivalent_sample_size: default_equivalent_sample_size(),
            base: default_base(),
            moving_average_window: default_moving_average_window(),
            anomaly_window_size: default_anomaly_window_size(),
            anomaly_min_window_size: default_anomaly_min_window_size(),
            prior_floor: default_prior_floor(),
        }
    }

    /// Validate every option. Called once before day 0; all violations are
    /// fatal [`Error::InvalidConfiguration`]s.
    pub fn validate(&self) -> Result<()> {
        let n = self.diseases.len();
        if self.original_priors.len() != n {
            return Err(Error::InvalidConfiguration(format!(
                "original_priors has {} entries for {} diseases",
                self.original_priors.len(),
                n
            )));
        }
        if self.log_likelihood_fields.len() != n {
            return Err(Error::InvalidConfiguration(format!(
                "log_likelihood_fields has {} entries for {} diseases",
                self.log_likelihood_fields.len(),
                n
            )));
        }
        for (label, field) in self.diseases.iter().zip(&self.log_likelihood_fields) {
            if field.is_empty() {
                return Err(Error::InvalidConfiguration(format!(
                    "log-likelihood field for {label:?} is empty"
                )));
            }
        }

        let residual = self.diseases.residual_index();
        let mut named_mass = 0.0;
        for (i, &p) in self.original_priors.iter().enumerate() {
            if i == residual {
                continue;
            }
            if !p.is_finite() || p <= 0.0 {
                return Err(Error::InvalidConfiguration(format!(
                    "baseline prior for {:?} is {p}; must be finite and > 0",
                    self.diseases.labels()[i]
                )));
            }
            named_mass += p;
        }
        if named_mass >= 1.0 - PROB_SUM_TOLERANCE {
            return Err(Error::InvalidConfiguration(format!(
                "named syndromes carry baseline mass {named_mass}; \
                 nothing is left for the residual category {:?}",
                self.diseases.residual()
            )));
        }

        if !self.equivalent_sample_size.is_finite() || self.equivalent_sample_size <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "equivalent_sample_size is {}; must be finite and > 0",
                self.equivalent_sample_size
            )));
        }
        if !self.base.is_finite() || self.base <= 0.0 || self.base == 1.0 {
            return Err(Error::InvalidConfiguration(format!(
                "base is {}; must be finite, > 0 and != 1",
                self.base
            )));
        }
        if !self.prior_floor.is_finite() || self.prior_floor <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "prior_floor is {}; must be finite and > 0",
                self.prior_floor
            )));
        }
        if self.moving_average_window == 0 {
            return Err(Error::InvalidConfiguration(
                "moving_average_window must be >= 1".to_string(),
            ));
        }
        if self.anomaly_window_size == 0 {
            return Err(Error::InvalidConfiguration(
                "anomaly_window_size must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Baseline priors with the residual entry recomputed as the complement
    /// of the named syndromes' mass, so the vector sums to 1 exactly.
    pub fn baseline_priors(&self) -> Vec<f64> {
        let residual = self.diseases.residual_index();
        let named_mass: f64 = self
            .original_priors
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != residual)
            .map(|(_, p)| p)
            .sum();
        let mut priors = self.original_priors.clone();
        priors[residual] = 1.0 - named_mass;
        priors
    }
}
