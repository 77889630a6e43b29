//! The sequential day-over-day tracker loop.
//!
//! Days are an inherently sequential fold: each day's prior is a function
//! of the previous day's aggregate. The loop owns the single prior vector,
//! passes it by value through [`Tracker::step`], and collects each day's
//! aggregate into the output series.

use ili_common::{DayCohort, Error, PriorVector, Result, TrackerConfig};
use ili_math::{empirical_p, moving_average, Shrinkage};
use tracing::debug;

use crate::filter::{run_day, DayAggregate};
use crate::series::TrackerOutput;

/// The recursive Bayesian tracker. Construction validates the entire
/// configuration; a built tracker cannot fail on configuration grounds.
#[derive(Debug, Clone)]
pub struct Tracker {
    config: TrackerConfig,
    baseline: Vec<f64>,
    shrinkage: Shrinkage,
    initial_prior: PriorVector,
}

impl Tracker {
    /// Build a tracker from a validated configuration.
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        let baseline = config.baseline_priors();
        let shrinkage = Shrinkage::new(config.equivalent_sample_size, config.prior_floor)
            .ok_or_else(|| {
                Error::InvalidConfiguration(
                    "equivalent_sample_size and prior_floor must be positive".to_string(),
                )
            })?;
        let initial_prior = PriorVector::new(baseline.clone())?;
        debug!(
            target: "ili_core::tracker",
            diseases = config.diseases.len(),
            equivalent_sample_size = config.equivalent_sample_size,
            base = config.base,
            "tracker configured"
        );
        Ok(Self {
            config,
            baseline,
            shrinkage,
            initial_prior,
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// The day-0 prior: baseline priors with the residual complement.
    pub fn initial_prior(&self) -> &PriorVector {
        &self.initial_prior
    }

    /// Advance one day: filter the cohort under `prior`, then blend the
    /// day's expected counts with the baseline priors into tomorrow's
    /// prior. Pure in `(prior, cohort)`; the caller threads the state.
    pub fn step(
        &self,
        prior: PriorVector,
        cohort: &DayCohort,
    ) -> Result<(PriorVector, DayAggregate)> {
        let aggregate = run_day(
            &prior,
            cohort,
            &self.config.log_likelihood_fields,
            self.config.base,
        )?;
        let blended = self
            .shrinkage
            .update(&aggregate.expected, &self.baseline)
            .ok_or_else(|| {
                Error::InvalidConfiguration(format!(
                    "prior update failed on {}: baseline priors are inconsistent",
                    cohort.date
                ))
            })?;
        let next_prior = PriorVector::new(blended)?;
        debug!(
            target: "ili_core::tracker",
            date = %cohort.date,
            patients = cohort.patient_count(),
            mean_log_evidence = aggregate.mean_log_evidence,
            "day filtered"
        );
        Ok((next_prior, aggregate))
    }

    /// Run the full fold over a chronologically ordered day range.
    pub fn run(&self, days: &[DayCohort]) -> Result<TrackerOutput> {
        let mut output = TrackerOutput::new(self.config.diseases.clone());
        let mut prior = self.initial_prior.clone();
        for cohort in days {
            let (next_prior, aggregate) = self.step(prior, cohort)?;
            output.push_day(cohort.date, &aggregate);
            prior = next_prior;
        }
        Ok(output)
    }

    /// Smooth any output series with the configured moving-average window.
    pub fn smooth(&self, series: &[f64]) -> Vec<f64> {
        moving_average(self.config.moving_average_window, series)
    }

    /// Empirical p-values of the run's daily log-evidence, using the
    /// configured anomaly windows. Low values flag days whose model fit is
    /// unusually poor against recent history.
    pub fn anomaly_scores(&self, output: &TrackerOutput) -> Vec<f64> {
        empirical_p(
            self.config.anomaly_window_size,
            self.config.anomaly_min_window_size,
            output.daily_log_probability(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ili_common::{DiseaseSet, PatientRecord};

    fn two_disease_config() -> TrackerConfig {
        let diseases = DiseaseSet::new(["X", "OTHER"]).unwrap();
        TrackerConfig {
            original_priors: vec![0.5, 0.5],
            log_likelihood_fields: vec!["X_ll".to_string(), "OTHER_ll".to_string()],
            ..TrackerConfig::with_default_priors(diseases)
        }
    }

    fn cohort(day: u64, patients: Vec<PatientRecord>) -> DayCohort {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        DayCohort::new(start + chrono::Days::new(day), patients)
    }

    fn patient(x: f64, other: f64) -> PatientRecord {
        PatientRecord::new()
            .with_number("X_ll", x)
            .with_number("OTHER_ll", other)
    }

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn construction_rejects_invalid_config() {
        let mut config = two_disease_config();
        config.base = 1.0;
        assert!(matches!(
            Tracker::new(config),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn initial_prior_uses_residual_complement() {
        let mut config = two_disease_config();
        config.original_priors = vec![0.2, 0.123];
        let tracker = Tracker::new(config).unwrap();
        let prior = tracker.initial_prior().as_slice();
        assert!(approx_eq(prior[0], 0.2, 1e-12));
        assert!(approx_eq(prior[1], 0.8, 1e-12));
    }

    #[test]
    fn balanced_evidence_keeps_prior_fixed() {
        // Expected counts [1, 1] over 2 patients with ess=10 and baseline
        // [0.5, 0.5]: raw = [(1+5)/12, (1+5)/12] = [0.5, 0.5].
        let tracker = Tracker::new(two_disease_config()).unwrap();
        let day = cohort(0, vec![patient(-2.0, -2.0), patient(-2.0, -2.0)]);
        let (next_prior, aggregate) = tracker.step(tracker.initial_prior().clone(), &day).unwrap();

        assert!(approx_eq(aggregate.expected[0], 1.0, 1e-9));
        assert!(approx_eq(aggregate.expected[1], 1.0, 1e-9));
        assert!(approx_eq(next_prior.as_slice()[0], 0.5, 1e-9));
        assert!(approx_eq(next_prior.as_slice()[1], 0.5, 1e-9));
    }

    #[test]
    fn decisive_days_shift_the_prior_toward_the_data() {
        let tracker = Tracker::new(two_disease_config()).unwrap();
        let day = cohort(0, vec![patient(5.0, -5.0); 20]);
        let (next_prior, _) = tracker.step(tracker.initial_prior().clone(), &day).unwrap();
        // 20 decisive patients against ess=10 of [0.5, 0.5] pseudo-counts:
        // raw ≈ [(20+5)/30, (0+5)/30].
        assert!(approx_eq(next_prior.as_slice()[0], 25.0 / 30.0, 1e-3));
        assert!(next_prior.as_slice()[0] > 0.5);
    }

    #[test]
    fn huge_sample_size_pins_prior_to_baseline() {
        let mut config = two_disease_config();
        config.equivalent_sample_size = 1e12;
        let tracker = Tracker::new(config).unwrap();
        let day = cohort(0, vec![patient(8.0, -8.0); 5]);
        let (next_prior, _) = tracker.step(tracker.initial_prior().clone(), &day).unwrap();
        assert!(approx_eq(next_prior.as_slice()[0], 0.5, 1e-6));
        assert!(approx_eq(next_prior.as_slice()[1], 0.5, 1e-6));
    }

    #[test]
    fn run_collects_aligned_series() {
        let tracker = Tracker::new(two_disease_config()).unwrap();
        let days = vec![
            cohort(0, vec![patient(3.0, -3.0), patient(-3.0, 3.0)]),
            cohort(1, vec![patient(1.0, -1.0)]),
            cohort(2, vec![patient(-4.0, 4.0), patient(-4.0, 4.0), patient(0.0, 0.0)]),
        ];
        let output = tracker.run(&days).unwrap();

        assert_eq!(output.len(), 3);
        let x = output.expected_counts("X").unwrap();
        let other = output.expected_counts("OTHER").unwrap();
        for (day, (a, b)) in x.iter().zip(other).enumerate() {
            let patients = days[day].patient_count() as f64;
            assert!(approx_eq(a + b, patients, 1e-6), "day {day}");
        }
        assert_eq!(output.daily_log_probability().len(), 3);
    }

    #[test]
    fn run_surfaces_empty_day() {
        let tracker = Tracker::new(two_disease_config()).unwrap();
        let days = vec![cohort(0, vec![patient(1.0, -1.0)]), cohort(1, vec![])];
        assert!(matches!(
            tracker.run(&days),
            Err(Error::EmptyDay { .. })
        ));
    }

    #[test]
    fn every_updated_prior_is_floored_and_normalized() {
        let mut config = two_disease_config();
        config.equivalent_sample_size = 0.001;
        config.prior_floor = 1e-4;
        let tracker = Tracker::new(config).unwrap();

        let mut prior = tracker.initial_prior().clone();
        for day in 0..30 {
            let day_data = cohort(day, vec![patient(9.0, -9.0); 4]);
            let (next_prior, _) = tracker.step(prior, &day_data).unwrap();
            let sum: f64 = next_prior.as_slice().iter().sum();
            assert!(approx_eq(sum, 1.0, 1e-9));
            let bound = 1e-4 / (1.0 + 2.0 * 1e-4);
            assert!(next_prior.as_slice().iter().all(|&p| p >= bound - 1e-15));
            prior = next_prior;
        }
        // Starved category survives at the floor, not at zero.
        assert!(prior.as_slice()[1] < 1e-2);
    }

    #[test]
    fn anomaly_scores_use_configured_windows() {
        let mut config = two_disease_config();
        config.anomaly_window_size = 3;
        config.anomaly_min_window_size = 2;
        let tracker = Tracker::new(config).unwrap();

        let days: Vec<DayCohort> = (0..6)
            .map(|d| {
                // Day 4 fits the model far worse than its neighbors.
                let score = if d == 4 { -30.0 } else { -2.0 };
                cohort(d, vec![patient(score, score)])
            })
            .collect();
        let output = tracker.run(&days).unwrap();
        let p = tracker.anomaly_scores(&output);

        assert_eq!(p.len(), 6);
        assert!(p[0].is_nan() && p[1].is_nan() && p[2].is_nan());
        assert_eq!(p[4], 0.0);
    }

    #[test]
    fn smooth_uses_configured_window() {
        let mut config = two_disease_config();
        config.moving_average_window = 1;
        let tracker = Tracker::new(config).unwrap();
        let series = [1.0, 5.0, 9.0];
        assert_eq!(tracker.smooth(&series), series.to_vec());
    }
}
