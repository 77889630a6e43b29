//! ILI Tracker shared types and errors.
//!
//! This crate provides the foundational types shared across ili-core modules:
//! - Disease label sets with a reserved residual category
//! - Validated prior probability vectors
//! - Patient records with typed field access
//! - Tracker configuration and up-front validation
//! - Common error types

pub mod config;
pub mod disease;
pub mod error;
pub mod patient;
pub mod prior;

pub use config::TrackerConfig;
pub use disease::DiseaseSet;
pub use error::{Error, Result};
pub use patient::{DayCohort, FieldValue, PatientRecord};
pub use prior::PriorVector;

/// Tolerance used when checking that a probability vector sums to 1.
pub const PROB_SUM_TOLERANCE: f64 = 1e-6;

/// Default minimum mass any disease keeps after a prior update.
pub const DEFAULT_PRIOR_FLOOR: f64 = 1e-4;
