//! # Leaf Health
//!
//! A Rust crate for screening plant leaf photographs for nutrient deficiency
//! from their average color.
//!
//! This library classifies a leaf by:
//! - Rescaling the photograph to a canonical width
//! - Suppressing non-leaf background pixels by HSV color range
//! - Averaging hue, saturation and value over the frame
//! - Comparing the averages with a baseline built from healthy references
//! - Applying ordered thresholds to the differences
//!
//! ## Example
//!
//! ```rust,no_run
//! use leaf_health::{analyze_leaf, BaselineProfiler, FeaturePipeline, PipelineConfig};
//! use std::path::Path;
//!
//! let config = PipelineConfig::default_reference_set();
//! let baseline = BaselineProfiler::from_config(&config).profile(&config)?;
//!
//! let pipeline = FeaturePipeline::with_masking(config.leaf_masking);
//! let report = analyze_leaf(Path::new("leaf.jpg"), &baseline, &pipeline)?;
//! println!("{}", report.classification);
//! # Ok::<(), leaf_health::AnalysisError>(())
//! ```

use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod error;
pub mod constants;
pub mod config;
pub mod logger;
pub mod image_loader;
pub mod preprocessing;
pub mod detection;
pub mod color;
pub mod pipeline;
pub mod diagnosis;

pub use error::{AnalysisError, Result};
pub use config::PipelineConfig;
pub use color::ColorFeatures;
pub use pipeline::FeaturePipeline;
pub use diagnosis::{
    classify, compare_features, BaselineProfiler, Classification, FeatureDifference,
    HealthyBaseline,
};

/// Complete diagnosis of one leaf photograph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Features of the test photograph
    pub features: ColorFeatures,
    /// Healthy baseline the photograph was compared with
    pub baseline: HealthyBaseline,
    /// Baseline minus test features
    pub difference: FeatureDifference,
    /// Health label
    pub classification: Classification,
}

impl HealthReport {
    /// Compare `features` with `baseline` and classify the difference
    pub fn from_features(features: ColorFeatures, baseline: &HealthyBaseline) -> Self {
        let difference = baseline.compare(&features);
        let classification = classify(&difference);

        tracing::info!(
            hue_diff = difference.hue_diff,
            saturation_diff = difference.saturation_diff,
            value_diff = difference.value_diff,
            %classification,
            "leaf classified"
        );

        Self {
            features,
            baseline: *baseline,
            difference,
            classification,
        }
    }
}

/// Diagnose an already-decoded leaf photograph
pub fn diagnose(
    image: &RgbImage,
    baseline: &HealthyBaseline,
    pipeline: &FeaturePipeline,
) -> Result<HealthReport> {
    let features = pipeline.features(image)?;
    Ok(HealthReport::from_features(features, baseline))
}

/// Load and diagnose a leaf photograph
///
/// # Errors
///
/// Returns `AnalysisError::ImageLoadError` if the photograph cannot be loaded.
pub fn analyze_leaf(
    image_path: &Path,
    baseline: &HealthyBaseline,
    pipeline: &FeaturePipeline,
) -> Result<HealthReport> {
    let image = image_loader::load_image(image_path)?;
    diagnose(&image, baseline, pipeline)
}
