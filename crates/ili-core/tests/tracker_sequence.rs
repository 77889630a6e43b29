//! End-to-end run over a synthetic admission history with an outbreak.

use chrono::{Days, NaiveDate};
use ili_common::{DayCohort, DiseaseSet, PatientRecord, TrackerConfig};
use ili_core::labs::daily_lab_positive;
use ili_core::Tracker;

const PRE_OUTBREAK_DAYS: u64 = 20;
const OUTBREAK_DAYS: u64 = 10;
const PATIENTS_PER_DAY: usize = 5;

fn config() -> TrackerConfig {
    let diseases = DiseaseSet::new(["INFLUENZA", "RSV", "OTHER"]).unwrap();
    let mut config = TrackerConfig::with_default_priors(diseases);
    config.anomaly_window_size = 7;
    config.anomaly_min_window_size = 3;
    config
}

/// A patient whose scores favor `strong` (log10 units).
fn scored_patient(strong: &str) -> PatientRecord {
    let mut record = PatientRecord::new();
    for label in ["INFLUENZA", "RSV", "OTHER"] {
        let score = if label == strong { -1.0 } else { -3.0 };
        record = record.with_number(format!("{label}_loglikelihood_T"), score);
    }
    record
}

fn history() -> Vec<DayCohort> {
    let start = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
    let mut days = Vec::new();
    for d in 0..PRE_OUTBREAK_DAYS {
        let patients = vec![scored_patient("OTHER"); PATIENTS_PER_DAY];
        days.push(DayCohort::new(start + Days::new(d), patients));
    }
    for d in PRE_OUTBREAK_DAYS..PRE_OUTBREAK_DAYS + OUTBREAK_DAYS {
        let patients: Vec<PatientRecord> = (0..PATIENTS_PER_DAY)
            .map(|_| scored_patient("INFLUENZA").with_text("LAB_INFLUENZA", "P"))
            .collect();
        days.push(DayCohort::new(start + Days::new(d), patients));
    }
    days
}

#[test]
fn expected_counts_partition_every_day() {
    let tracker = Tracker::new(config()).unwrap();
    let days = history();
    let output = tracker.run(&days).unwrap();

    assert_eq!(output.len(), days.len());
    let flu = output.expected_counts("INFLUENZA").unwrap();
    let rsv = output.expected_counts("RSV").unwrap();
    let other = output.residual_counts();
    for day in 0..output.len() {
        let total = flu[day] + rsv[day] + other[day];
        assert!(
            (total - PATIENTS_PER_DAY as f64).abs() < 1e-6,
            "day {day}: total {total}"
        );
    }
}

#[test]
fn outbreak_shifts_expected_counts() {
    let tracker = Tracker::new(config()).unwrap();
    let output = tracker.run(&history()).unwrap();
    let flu = output.expected_counts("INFLUENZA").unwrap();

    let quiet_day = (PRE_OUTBREAK_DAYS - 1) as usize;
    let loud_day = (PRE_OUTBREAK_DAYS + OUTBREAK_DAYS - 1) as usize;
    assert!(flu[quiet_day] < 1.0, "quiet day flu = {}", flu[quiet_day]);
    assert!(flu[loud_day] > 3.0, "outbreak day flu = {}", flu[loud_day]);
    assert!(flu[loud_day] > flu[quiet_day] * 3.0);
}

#[test]
fn outbreak_onset_scores_as_anomalous() {
    let tracker = Tracker::new(config()).unwrap();
    let output = tracker.run(&history()).unwrap();
    let p = tracker.anomaly_scores(&output);

    assert_eq!(p.len(), output.len());
    // Insufficient history: min_window_size boundary is inclusive.
    for (day, value) in p.iter().take(4).enumerate() {
        assert!(value.is_nan(), "day {day} should be undefined");
    }
    // The first outbreak day fits the quiet-period model far worse than
    // anything in its trailing window.
    assert_eq!(p[PRE_OUTBREAK_DAYS as usize], 0.0);
}

#[test]
fn smoothing_keeps_alignment() {
    let tracker = Tracker::new(config()).unwrap();
    let output = tracker.run(&history()).unwrap();

    let smoothed = output
        .smoothed_expected("INFLUENZA", tracker.config().moving_average_window)
        .unwrap();
    assert_eq!(smoothed.len(), output.len());

    let raw = output.expected_counts("INFLUENZA").unwrap();
    assert_eq!(tracker.smooth(raw).len(), raw.len());
    // Identity smoothing is exact.
    assert_eq!(output.smoothed_expected("INFLUENZA", 1).unwrap(), raw);
}

#[test]
fn lab_overlay_matches_seeded_positives() {
    let days = history();
    let positives = daily_lab_positive("INFLUENZA", &days);
    for (day, &count) in positives.iter().enumerate() {
        let expected = if (day as u64) < PRE_OUTBREAK_DAYS {
            0
        } else {
            PATIENTS_PER_DAY
        };
        assert_eq!(count, expected, "day {day}");
    }
}

#[test]
fn output_serializes_for_reporting() {
    let tracker = Tracker::new(config()).unwrap();
    let output = tracker.run(&history()[..5]).unwrap();
    let json = serde_json::to_string(&output).unwrap();
    let back: ili_core::TrackerOutput = serde_json::from_str(&json).unwrap();
    assert_eq!(back, output);
}
