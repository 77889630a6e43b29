//! Patient records and per-day cohorts.
//!
//! Records are produced by an external evidence source and are read-only to
//! the tracker. A missing configured field is a contract violation surfaced
//! by the caller-facing accessors, never silently substituted.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single stored patient field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Numeric field, e.g. a per-disease log-likelihood score.
    Number(f64),
    /// Textual field, e.g. a lab result flag ("P"/"N").
    Text(String),
}

/// One patient's record: an opaque map of named fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl PatientRecord {
    /// Empty record; populate with [`with_number`](Self::with_number) and
    /// [`with_text`](Self::with_text).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a numeric field.
    pub fn with_number(mut self, field: impl Into<String>, value: f64) -> Self {
        self.fields.insert(field.into(), FieldValue::Number(value));
        self
    }

    /// Add a text field.
    pub fn with_text(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields
            .insert(field.into(), FieldValue::Text(value.into()));
        self
    }

    /// Whether the record carries a value for `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Numeric value of `field`, or `None` if absent or non-numeric.
    pub fn number(&self, field: &str) -> Option<f64> {
        match self.fields.get(field) {
            Some(FieldValue::Number(v)) => Some(*v),
            _ => None,
        }
    }

    /// Text value of `field`, or `None` if absent or non-textual.
    pub fn text(&self, field: &str) -> Option<&str> {
        match self.fields.get(field) {
            Some(FieldValue::Text(v)) => Some(v.as_str()),
            _ => None,
        }
    }
}

/// All patient records admitted on one calendar day, in admission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCohort {
    pub date: NaiveDate,
    pub patients: Vec<PatientRecord>,
}

impl DayCohort {
    pub fn new(date: NaiveDate, patients: Vec<PatientRecord>) -> Self {
        Self { date, patients }
    }

    pub fn patient_count(&self) -> usize {
        self.patients.len()
    }
}
