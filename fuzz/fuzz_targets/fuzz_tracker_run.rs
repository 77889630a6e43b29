//! Fuzz target for the day fold.
//!
//! Arbitrary finite patient scores must produce expected counts that
//! partition each day's patient count; malformed records must surface as
//! errors, never panics.

#![no_main]

use arbitrary::Arbitrary;
use chrono::NaiveDate;
use ili_common::{DayCohort, DiseaseSet, PatientRecord, TrackerConfig};
use ili_core::Tracker;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    days: Vec<Vec<[f64; 3]>>,
}

fuzz_target!(|input: Input| {
    let diseases = DiseaseSet::new(["A", "B", "OTHER"]).expect("static labels");
    let config = TrackerConfig::with_default_priors(diseases);
    let fields = config.log_likelihood_fields.clone();
    let tracker = Tracker::new(config).expect("static config");

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("static date");
    let days: Vec<DayCohort> = input
        .days
        .iter()
        .take(64)
        .enumerate()
        .map(|(i, scores)| {
            let patients = scores
                .iter()
                .take(32)
                .map(|patient| {
                    let mut record = PatientRecord::new();
                    for (field, &score) in fields.iter().zip(patient) {
                        // Keep scores in a representable log10 range.
                        record = record.with_number(field.clone(), score.clamp(-300.0, 300.0));
                    }
                    record
                })
                .collect();
            DayCohort::new(start + chrono::Days::new(i as u64), patients)
        })
        .collect();

    match tracker.run(&days) {
        Ok(output) => {
            for (day, cohort) in days.iter().enumerate() {
                let total: f64 = output
                    .diseases()
                    .iter()
                    .filter_map(|label| output.expected_counts(label))
                    .map(|series| series[day])
                    .sum();
                let patients = cohort.patient_count() as f64;
                assert!((total - patients).abs() < 1e-6 * patients.max(1.0));
            }
        }
        // Empty days and non-finite scores are legitimate rejections.
        Err(_) => {}
    }
});
