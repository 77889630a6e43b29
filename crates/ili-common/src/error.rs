//! Error types for the ILI tracker.
//!
//! All failures are surfaced to the caller; the engine is a pure computation
//! over provided data and never retries internally.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for ILI tracker operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Configuration errors (priors, fields, hyperparameters).
    Config,
    /// Input data contract violations (cohorts, patient records).
    Data,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Data => write!(f, "data"),
        }
    }
}

/// Unified error type for the ILI tracker.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed configuration, detected before any day is processed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A day with zero patient records. Raised explicitly rather than
    /// allowed to divide by zero; callers must pre-filter empty days.
    #[error("no patient records for {date}")]
    EmptyDay { date: NaiveDate },

    /// A patient record lacking a configured log-likelihood field.
    /// Propagated, not defaulted: silently imputing a likelihood would
    /// corrupt the posterior.
    #[error("patient record on {date} is missing field {field:?}")]
    MissingField { date: NaiveDate, field: String },

    /// A stored log-likelihood that is NaN or infinite. As unusable as an
    /// absent value, but reported separately so the producer can tell a
    /// dropped column from a corrupted one.
    #[error("field {field:?} on {date} holds non-finite log-likelihood {value}")]
    NonFiniteEvidence {
        date: NaiveDate,
        field: String,
        value: f64,
    },
}

impl Error {
    /// Category of this error for grouping and log filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidConfiguration(_) => ErrorCategory::Config,
            Error::EmptyDay { .. }
            | Error::MissingField { .. }
            | Error::NonFiniteEvidence { .. } => ErrorCategory::Data,
        }
    }

    /// Whether the caller can recover by skipping or fixing the offending
    /// input. Configuration errors are fatal for the whole run.
    pub fn recoverable(&self) -> bool {
        !matches!(self, Error::InvalidConfiguration(_))
    }
}
