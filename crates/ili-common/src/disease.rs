//! Ordered disease label set with a reserved residual category.
//!
//! The last label is the residual ("everything else") syndrome. Callers
//! address it through the named accessors instead of poking at the final
//! array position.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Fixed, ordered list of disease labels. At least two labels; the last one
/// is the residual category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct DiseaseSet {
    labels: Vec<String>,
}

impl DiseaseSet {
    /// Create a disease set from ordered labels.
    ///
    /// Requires at least two labels (one named syndrome plus the residual)
    /// and no duplicates.
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() < 2 {
            return Err(Error::InvalidConfiguration(format!(
                "need at least 2 disease labels (one syndrome plus the residual), got {}",
                labels.len()
            )));
        }
        for (i, label) in labels.iter().enumerate() {
            if label.is_empty() {
                return Err(Error::InvalidConfiguration(format!(
                    "disease label at position {i} is empty"
                )));
            }
            if labels[..i].contains(label) {
                return Err(Error::InvalidConfiguration(format!(
                    "duplicate disease label {label:?}"
                )));
            }
        }
        Ok(Self { labels })
    }

    /// Number of disease categories, residual included.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false: construction guarantees at least two labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// All labels in order, residual last.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The reserved residual category label.
    pub fn residual(&self) -> &str {
        // Invariant: labels.len() >= 2.
        &self.labels[self.labels.len() - 1]
    }

    /// Index of the residual category.
    pub fn residual_index(&self) -> usize {
        self.labels.len() - 1
    }

    /// Position of a label, if present.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Iterate over labels in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl TryFrom<Vec<String>> for DiseaseSet {
    type Error = Error;

    fn try_from(labels: Vec<String>) -> Result<Self> {
        DiseaseSet::new(labels)
    }
}

impl From<DiseaseSet> for Vec<String> {
    fn from(set: DiseaseSet) -> Self {
        set.labels
    }
}
