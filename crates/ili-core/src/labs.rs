//! Lab-confirmation overlays.
//!
//! Lab results arrive as text fields `LAB_<DX>` and `LAB_<DX>_ADDITIONAL`
//! holding "P" (positive) or "N" (negative); anything else means the test
//! was not run. Daily positive counts serve as a ground-truth overlay next
//! to the tracker's expected counts.

use ili_common::{DayCohort, PatientRecord};

const POSITIVE: &str = "P";
const NEGATIVE: &str = "N";

fn primary_field(disease: &str) -> String {
    format!("LAB_{disease}")
}

fn additional_field(disease: &str) -> String {
    format!("LAB_{disease}_ADDITIONAL")
}

fn flag(patient: &PatientRecord, field: &str) -> Option<String> {
    patient.text(field).map(str::to_string)
}

/// Whether either lab field records a completed test for `disease`.
pub fn tested(patient: &PatientRecord, disease: &str) -> bool {
    [primary_field(disease), additional_field(disease)]
        .iter()
        .filter_map(|field| flag(patient, field))
        .any(|value| value == POSITIVE || value == NEGATIVE)
}

/// Whether any lab field is positive for `disease`.
pub fn lab_positive(patient: &PatientRecord, disease: &str) -> bool {
    [primary_field(disease), additional_field(disease)]
        .iter()
        .filter_map(|field| flag(patient, field))
        .any(|value| value == POSITIVE)
}

/// Tested for `disease` with no positive result.
pub fn lab_negative(patient: &PatientRecord, disease: &str) -> bool {
    tested(patient, disease) && !lab_positive(patient, disease)
}

/// Per-day count of lab-confirmed positives for `disease`, aligned with
/// the cohort ordering.
pub fn daily_lab_positive(disease: &str, days: &[DayCohort]) -> Vec<usize> {
    days.iter()
        .map(|cohort| {
            cohort
                .patients
                .iter()
                .filter(|patient| lab_positive(patient, disease))
                .count()
        })
        .collect()
}
