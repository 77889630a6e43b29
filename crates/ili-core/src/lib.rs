//! ILI Tracker core engine.
//!
//! Turns per-patient diagnostic log-likelihood scores into day-by-day
//! expected syndrome counts with a recursive Bayesian filter, and flags
//! days whose aggregate model fit is statistically unusual.
//!
//! The crate is a pure computation over pre-loaded data: record ingestion,
//! the upstream NLP/classification stage, and report rendering live in
//! external collaborators that speak the types in [`ili_common`].
//!
//! # Overview
//!
//! ```ignore
//! use ili_common::{DayCohort, DiseaseSet, TrackerConfig};
//! use ili_core::Tracker;
//!
//! let diseases = DiseaseSet::new(["INFLUENZA", "RSV", "OTHER"])?;
//! let tracker = Tracker::new(TrackerConfig::with_default_priors(diseases))?;
//! let output = tracker.run(&cohorts)?;
//!
//! let flu = output.expected_counts("INFLUENZA").unwrap();
//! let anomalies = tracker.anomaly_scores(&output);
//! ```

pub mod filter;
pub mod labs;
pub mod logging;
pub mod series;
pub mod tracker;

pub use filter::{run_day, DayAggregate};
pub use series::TrackerOutput;
pub use tracker::Tracker;
