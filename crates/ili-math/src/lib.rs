//! ILI Tracker math utilities.

pub mod math;

pub use math::shrinkage::*;
pub use math::smoothing::*;
pub use math::stable::*;
pub use math::surprise::*;
