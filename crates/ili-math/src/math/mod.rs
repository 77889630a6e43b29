//! Core math modules.

pub mod shrinkage;
pub mod smoothing;
pub mod stable;
pub mod surprise;
