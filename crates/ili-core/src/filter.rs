//! Per-day Bayesian filter: prior plus one day's patient evidence.
//!
//! All likelihood combination happens in natural-log space with a
//! log-sum-exp reduction; only bounded posteriors in [0, 1] are
//! exponentiated, so overflow cannot occur for finite scores.

use ili_common::{DayCohort, Error, PriorVector, Result};
use ili_math::{ln_from_base, normalize_log_probs};
use serde::{Deserialize, Serialize};

/// One day's aggregated filter output. Produced once, never revised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAggregate {
    /// Expected case count per disease, index-aligned with the disease set.
    /// Non-negative; sums to the day's patient count.
    pub expected: Vec<f64>,
    /// Mean per-patient log-evidence for the day, in natural-log units.
    pub mean_log_evidence: f64,
}

impl DayAggregate {
    /// Total expected count, i.e. the day's patient count.
    pub fn total_expected(&self) -> f64 {
        self.expected.iter().sum()
    }
}

/// Run the filter over one day's cohort.
///
/// For each patient the per-disease log-likelihoods (stored in base `base`)
/// are converted to nats, combined with the log-prior, and normalized by
/// the patient's log-evidence. Posteriors accumulate into expected counts;
/// log-evidences average into the day's model-fit score.
///
/// The prior is valid by construction ([`PriorVector`] guarantees strictly
/// positive, normalized entries). An empty cohort is rejected before any
/// arithmetic so the mean can never divide by zero.
pub fn run_day(
    prior: &PriorVector,
    cohort: &DayCohort,
    log_likelihood_fields: &[String],
    base: f64,
) -> Result<DayAggregate> {
    if cohort.patients.is_empty() {
        return Err(Error::EmptyDay { date: cohort.date });
    }
    if log_likelihood_fields.len() != prior.len() {
        return Err(Error::InvalidConfiguration(format!(
            "{} log-likelihood fields for a {}-disease prior",
            log_likelihood_fields.len(),
            prior.len()
        )));
    }

    let log_priors = prior.ln_entries();
    let mut expected = vec![0.0; prior.len()];
    let mut log_evidence_sum = 0.0;

    for patient in &cohort.patients {
        let mut joint = Vec::with_capacity(prior.len());
        for (field, log_prior) in log_likelihood_fields.iter().zip(&log_priors) {
            let score = patient.number(field).ok_or_else(|| Error::MissingField {
                date: cohort.date,
                field: field.clone(),
            })?;
            if !score.is_finite() {
                return Err(Error::NonFiniteEvidence {
                    date: cohort.date,
                    field: field.clone(),
                    value: score,
                });
            }
            joint.push(ln_from_base(score, base) + log_prior);
        }

        let (posterior, log_evidence) =
            normalize_log_probs(&joint).ok_or_else(|| Error::InvalidConfiguration(format!(
                "patient evidence on {} produced a non-finite normalizer",
                cohort.date
            )))?;

        for (slot, p) in expected.iter_mut().zip(&posterior) {
            *slot += p;
        }
        log_evidence_sum += log_evidence;
    }

    Ok(DayAggregate {
        expected,
        mean_log_evidence: log_evidence_sum / cohort.patients.len() as f64,
    })
}
