//! Healthy baseline built from reference photographs
//!
//! The baseline is recomputed every run from the caller's reference list and
//! is never cached. It is a plain value: build it once, then pass it to every
//! comparison.

use super::difference::{compare_features, FeatureDifference};
use crate::color::ColorFeatures;
use crate::config::PipelineConfig;
use crate::constants::baseline::REFERENCE_IMAGE_COUNT;
use crate::pipeline::FeaturePipeline;
use crate::{AnalysisError, Result};
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Mean color features of known-healthy leaves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HealthyBaseline(ColorFeatures);

impl HealthyBaseline {
    /// Wrap precomputed features
    pub fn from_features(features: ColorFeatures) -> Self {
        Self(features)
    }

    pub fn features(&self) -> &ColorFeatures {
        &self.0
    }

    /// Baseline minus `test`, per channel
    pub fn compare(&self, test: &ColorFeatures) -> FeatureDifference {
        compare_features(&self.0, test)
    }
}

/// Computes a [`HealthyBaseline`] from exactly three references
#[derive(Debug, Clone, Default)]
pub struct BaselineProfiler {
    pipeline: FeaturePipeline,
}

impl BaselineProfiler {
    pub fn new(pipeline: FeaturePipeline) -> Self {
        Self { pipeline }
    }

    /// Profiler whose masking follows `config`
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(FeaturePipeline::with_masking(config.leaf_masking))
    }

    /// Load and profile the reference images named by `config`
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::ConfigurationError` if the reference count is
    /// wrong or any reference cannot be loaded; no partial baseline is built.
    pub fn profile(&self, config: &PipelineConfig) -> Result<HealthyBaseline> {
        self.profile_paths(&config.reference_images)
    }

    pub fn profile_paths(&self, references: &[PathBuf]) -> Result<HealthyBaseline> {
        check_reference_count(references.len())?;

        let mut features = Vec::with_capacity(references.len());
        for path in references {
            let reference = self.pipeline.features_from_path(path).map_err(|e| match e {
                AnalysisError::ImageLoadError { .. } => AnalysisError::configuration(
                    format!("baseline reference {} is unusable", path.display()),
                    e,
                ),
                other => other,
            })?;
            tracing::debug!(path = %path.display(), ?reference, "profiled reference image");
            features.push(reference);
        }

        self.combine(&features)
    }

    /// Profile already-decoded reference rasters
    pub fn profile_images(&self, references: &[RgbImage]) -> Result<HealthyBaseline> {
        check_reference_count(references.len())?;

        let features = references
            .iter()
            .map(|image| self.pipeline.features(image))
            .collect::<Result<Vec<_>>>()?;

        self.combine(&features)
    }

    fn combine(&self, features: &[ColorFeatures]) -> Result<HealthyBaseline> {
        let mean = ColorFeatures::mean_of(features)
            .ok_or_else(|| AnalysisError::invalid_configuration("no baseline reference images"))?;

        tracing::info!(
            hue = mean.avg_hue,
            saturation = mean.avg_saturation,
            value = mean.avg_value,
            "healthy baseline ready"
        );
        Ok(HealthyBaseline(mean))
    }
}

fn check_reference_count(count: usize) -> Result<()> {
    if count != REFERENCE_IMAGE_COUNT {
        return Err(AnalysisError::invalid_configuration(format!(
            "expected {} reference images, got {}",
            REFERENCE_IMAGE_COUNT, count
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::ImageNormalizer;
    use image::Rgb;

    fn small_pipeline() -> FeaturePipeline {
        FeaturePipeline::with_masking(false).with_normalizer(ImageNormalizer::with_width(8).unwrap())
    }

    #[test]
    fn test_baseline_is_mean_of_references() {
        let profiler = BaselineProfiler::new(small_pipeline());
        let references = [
            RgbImage::from_pixel(8, 4, Rgb([0, 0, 90])),
            RgbImage::from_pixel(8, 4, Rgb([0, 0, 120])),
            RgbImage::from_pixel(8, 4, Rgb([0, 0, 150])),
        ];

        let baseline = profiler.profile_images(&references).unwrap();
        assert_eq!(baseline.features(), &ColorFeatures::new(120.0, 255.0, 120.0));
    }

    #[test]
    fn test_reference_order_does_not_matter() {
        let profiler = BaselineProfiler::new(small_pipeline());
        let a = RgbImage::from_pixel(8, 4, Rgb([40, 140, 40]));
        let b = RgbImage::from_pixel(8, 4, Rgb([90, 160, 30]));
        let c = RgbImage::from_pixel(8, 4, Rgb([20, 100, 60]));

        let forward = profiler.profile_images(&[a.clone(), b.clone(), c.clone()]).unwrap();
        let backward = profiler.profile_images(&[c, b, a]).unwrap();
        let f = forward.features();
        let r = backward.features();
        assert!((f.avg_hue - r.avg_hue).abs() < 1e-9);
        assert!((f.avg_saturation - r.avg_saturation).abs() < 1e-9);
        assert!((f.avg_value - r.avg_value).abs() < 1e-9);
    }

    #[test]
    fn test_wrong_reference_count() {
        let profiler = BaselineProfiler::new(small_pipeline());
        let image = RgbImage::from_pixel(8, 4, Rgb([40, 140, 40]));
        let result = profiler.profile_images(&[image.clone(), image]);
        assert!(matches!(result, Err(AnalysisError::ConfigurationError { .. })));
    }

    #[test]
    fn test_missing_reference_is_configuration_error() {
        let profiler = BaselineProfiler::default();
        let references = vec![
            PathBuf::from("no/such/reference_1.png"),
            PathBuf::from("no/such/reference_2.png"),
            PathBuf::from("no/such/reference_3.png"),
        ];
        match profiler.profile_paths(&references) {
            Err(AnalysisError::ConfigurationError { message, .. }) => {
                assert!(message.contains("reference_1.png"));
            }
            other => panic!("Expected ConfigurationError, got {:?}", other),
        }
    }

    #[test]
    fn test_profile_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = (0..3)
            .map(|i| {
                let path = dir.path().join(format!("healthy_{}.png", i));
                RgbImage::from_pixel(8, 4, Rgb([40, 140, 40])).save(&path).unwrap();
                path
            })
            .collect();

        let baseline = BaselineProfiler::new(small_pipeline()).profile_paths(&paths).unwrap();
        assert_eq!(baseline.features(), &ColorFeatures::new(60.0, 182.0, 140.0));
    }

    #[test]
    fn test_compare_against_baseline() {
        let baseline = HealthyBaseline::from_features(ColorFeatures::new(60.0, 182.0, 140.0));
        let diff = baseline.compare(&ColorFeatures::new(90.0, 255.0, 200.0));
        assert_eq!(diff, FeatureDifference::new(-30.0, -73.0, -60.0));
    }
}
