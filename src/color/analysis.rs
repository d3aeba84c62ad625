//! Mean HSV color features
//!
//! Averages each HSV channel over every pixel of a raster. The extractor does
//! not know whether the raster was masked: zeroed background pixels count
//! toward the denominator like any other pixel, so a large background pulls
//! saturation and value toward zero.

use crate::{color::ColorConverter, AnalysisError, Result};
use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Per-channel HSV means of a raster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorFeatures {
    /// Mean hue, 0-179
    pub avg_hue: f64,
    /// Mean saturation, 0-255
    pub avg_saturation: f64,
    /// Mean value (brightness), 0-255
    pub avg_value: f64,
}

impl ColorFeatures {
    pub fn new(avg_hue: f64, avg_saturation: f64, avg_value: f64) -> Self {
        Self {
            avg_hue,
            avg_saturation,
            avg_value,
        }
    }

    /// Element-wise arithmetic mean of a set of features
    ///
    /// Returns `None` for an empty set.
    pub fn mean_of(features: &[ColorFeatures]) -> Option<ColorFeatures> {
        if features.is_empty() {
            return None;
        }
        let n = features.len() as f64;
        let (h, s, v) = features.iter().fold((0.0, 0.0, 0.0), |(h, s, v), f| {
            (h + f.avg_hue, s + f.avg_saturation, v + f.avg_value)
        });
        Some(ColorFeatures::new(h / n, s / n, v / n))
    }
}

/// Extracts [`ColorFeatures`] from RGB rasters
#[derive(Debug, Clone, Default)]
pub struct ColorFeatureExtractor {
    converter: ColorConverter,
}

impl ColorFeatureExtractor {
    pub fn new() -> Self {
        Self {
            converter: ColorConverter::new(),
        }
    }

    /// Compute mean hue, saturation and value over all pixels
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::EmptyImage` for a raster without pixels.
    pub fn extract(&self, image: &RgbImage) -> Result<ColorFeatures> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(AnalysisError::EmptyImage { width, height });
        }

        let hsv = self.converter.to_hsv_image(image);

        // u64 sums are exact for any realistic pixel count
        let mut sums = [0u64; 3];
        for pixel in hsv.pixels() {
            for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
                *sum += channel as u64;
            }
        }

        let count = (width as u64 * height as u64) as f64;
        let features = ColorFeatures::new(
            sums[0] as f64 / count,
            sums[1] as f64 / count,
            sums[2] as f64 / count,
        );

        tracing::debug!(
            hue = features.avg_hue,
            saturation = features.avg_saturation,
            value = features.avg_value,
            "extracted color features"
        );
        Ok(features)
    }
}
