//! Raster-to-features pipeline shared by baseline references and test images

use crate::color::{ColorFeatureExtractor, ColorFeatures};
use crate::detection::LeafSegmenter;
use crate::image_loader::load_image;
use crate::preprocessing::ImageNormalizer;
use crate::Result;
use image::RgbImage;
use std::path::Path;

/// Normalize, optionally mask, then extract color features
#[derive(Debug, Clone)]
pub struct FeaturePipeline {
    normalizer: ImageNormalizer,
    segmenter: Option<LeafSegmenter>,
    extractor: ColorFeatureExtractor,
}

impl Default for FeaturePipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl FeaturePipeline {
    /// Pipeline with leaf masking enabled
    pub fn new() -> Self {
        Self::with_masking(true)
    }

    pub fn with_masking(leaf_masking: bool) -> Self {
        Self {
            normalizer: ImageNormalizer::new(),
            segmenter: leaf_masking.then(LeafSegmenter::new),
            extractor: ColorFeatureExtractor::new(),
        }
    }

    /// Use a non-canonical normalizer, mostly for small synthetic fixtures
    pub fn with_normalizer(mut self, normalizer: ImageNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Features of an already-decoded raster
    pub fn features(&self, image: &RgbImage) -> Result<ColorFeatures> {
        let normalized = self.normalizer.normalize(image)?;
        match &self.segmenter {
            Some(segmenter) => {
                let segmentation = segmenter.segment(&normalized)?;
                self.extractor.extract(&segmentation.masked)
            }
            None => self.extractor.extract(&normalized),
        }
    }

    /// Load `path` and compute its features
    pub fn features_from_path(&self, path: &Path) -> Result<ColorFeatures> {
        let image = load_image(path)?;
        self.features(&image)
    }
}
