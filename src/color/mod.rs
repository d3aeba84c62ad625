//! Color conversion and feature extraction module
//!
//! This module converts rasters to the 8-bit HSV scale and reduces them to
//! per-channel mean color features.

pub mod conversion;
pub mod analysis;

pub use conversion::{ColorConverter, HsvImage};
pub use analysis::{ColorFeatureExtractor, ColorFeatures};
