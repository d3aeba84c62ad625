//! Leaf health diagnosis module
//!
//! This module builds the healthy baseline, compares test features against
//! it and turns the difference into a health label.

pub mod baseline;
pub mod difference;
pub mod classifier;

pub use baseline::{BaselineProfiler, HealthyBaseline};
pub use difference::{compare_features, FeatureDifference};
pub use classifier::{classify, Classification};
