//! Accumulated per-day output series.

use chrono::NaiveDate;
use ili_common::DiseaseSet;
use ili_math::{empirical_p, moving_average};
use serde::{Deserialize, Serialize};

use crate::filter::DayAggregate;

/// Index-aligned output of a tracker run: one expected-count series per
/// disease plus the daily mean log-evidence, all over the same date axis.
///
/// Entries are appended once per day by the tracker loop and never revised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerOutput {
    diseases: DiseaseSet,
    dates: Vec<NaiveDate>,
    expected: Vec<Vec<f64>>,
    daily_log_probability: Vec<f64>,
}

impl TrackerOutput {
    pub(crate) fn new(diseases: DiseaseSet) -> Self {
        let n = diseases.len();
        Self {
            diseases,
            dates: Vec::new(),
            expected: vec![Vec::new(); n],
            daily_log_probability: Vec::new(),
        }
    }

    pub(crate) fn push_day(&mut self, date: NaiveDate, aggregate: &DayAggregate) {
        self.dates.push(date);
        for (series, &count) in self.expected.iter_mut().zip(&aggregate.expected) {
            series.push(count);
        }
        self.daily_log_probability.push(aggregate.mean_log_evidence);
    }

    /// Number of tracked days.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The disease set the series are aligned to.
    pub fn diseases(&self) -> &DiseaseSet {
        &self.diseases
    }

    /// Date axis, in processing order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Expected case counts per day for one disease label.
    pub fn expected_counts(&self, label: &str) -> Option<&[f64]> {
        let i = self.diseases.index_of(label)?;
        Some(&self.expected[i])
    }

    /// Expected case counts for the reserved residual category.
    pub fn residual_counts(&self) -> &[f64] {
        &self.expected[self.diseases.residual_index()]
    }

    /// Mean per-patient natural-log evidence per day.
    pub fn daily_log_probability(&self) -> &[f64] {
        &self.daily_log_probability
    }

    /// Centered moving average of one disease's expected counts.
    pub fn smoothed_expected(&self, label: &str, window_size: usize) -> Option<Vec<f64>> {
        self.expected_counts(label)
            .map(|series| moving_average(window_size, series))
    }

    /// Centered moving average of the daily log-evidence series.
    pub fn smoothed_log_probability(&self, window_size: usize) -> Vec<f64> {
        moving_average(window_size, &self.daily_log_probability)
    }

    /// Per-day empirical p-values of the daily log-evidence series.
    /// Undefined leading days are NaN.
    pub fn log_probability_p_values(
        &self,
        window_size: usize,
        min_window_size: usize,
    ) -> Vec<f64> {
        empirical_p(window_size, min_window_size, &self.daily_log_probability)
    }
}
