//! Canonical-width rescaling
//!
//! Features and thresholds assume every photograph has been brought to the
//! same width, so pixel-count-sensitive statistics stay comparable.

use crate::constants::normalization::{MAX_PROCESSING_PIXELS, TARGET_WIDTH};
use crate::{AnalysisError, Result};
use image::imageops::{self, FilterType};
use image::RgbImage;

/// Rescales rasters to a fixed width, keeping the aspect ratio
#[derive(Debug, Clone)]
pub struct ImageNormalizer {
    target_width: u32,
}

impl Default for ImageNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageNormalizer {
    /// Create a normalizer for the canonical width
    pub fn new() -> Self {
        Self {
            target_width: TARGET_WIDTH,
        }
    }

    /// Create a normalizer for a custom width
    pub fn with_width(target_width: u32) -> Result<Self> {
        if target_width == 0 {
            return Err(AnalysisError::InvalidParameter {
                parameter: "target_width".into(),
                value: target_width.to_string(),
            });
        }
        Ok(Self { target_width })
    }

    /// Output dimensions for an input of `width` x `height`
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidParameter` when the scaled raster would
    /// not fit a `u32` height or would exceed `MAX_PROCESSING_PIXELS`.
    pub fn target_dimensions(&self, width: u32, height: u32) -> Result<(u32, u32)> {
        if width == 0 || height == 0 {
            return Err(AnalysisError::EmptyImage { width, height });
        }
        let ratio = self.target_width as f64 / width as f64;
        let new_width = ((width as f64 * ratio).round() as u32).max(1);
        let scaled_height = (height as f64 * ratio).round().max(1.0);

        if scaled_height > u32::MAX as f64
            || new_width as f64 * scaled_height > MAX_PROCESSING_PIXELS as f64
        {
            return Err(AnalysisError::InvalidParameter {
                parameter: "image_dimensions".into(),
                value: format!(
                    "{}x{} scales to {}x{}, above the {} pixel limit",
                    width, height, new_width, scaled_height, MAX_PROCESSING_PIXELS
                ),
            });
        }
        Ok((new_width, scaled_height as u32))
    }

    /// Resize `image` to the target width
    ///
    /// Uses bilinear (triangle) filtering. The input is never modified.
    pub fn normalize(&self, image: &RgbImage) -> Result<RgbImage> {
        let (width, height) = image.dimensions();
        let (new_width, new_height) = self.target_dimensions(width, height)?;

        tracing::debug!(width, height, new_width, new_height, "normalizing image");

        if (new_width, new_height) == (width, height) {
            return Ok(image.clone());
        }
        Ok(imageops::resize(image, new_width, new_height, FilterType::Triangle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_landscape_downscale() {
        let normalizer = ImageNormalizer::new();
        assert_eq!(normalizer.target_dimensions(1200, 800).unwrap(), (600, 400));
    }

    #[test]
    fn test_portrait_upscale() {
        let normalizer = ImageNormalizer::new();
        assert_eq!(normalizer.target_dimensions(256, 256).unwrap(), (600, 600));
        assert_eq!(normalizer.target_dimensions(300, 451).unwrap(), (600, 902));
    }

    #[test]
    fn test_extreme_aspect_keeps_one_row() {
        let normalizer = ImageNormalizer::new();
        assert_eq!(normalizer.target_dimensions(10_000, 1).unwrap(), (600, 1));
    }

    #[test]
    fn test_tall_thin_images_rejected() {
        let normalizer = ImageNormalizer::new();
        for &(w, h) in &[(1, 10_000_000), (1, 40_000), (1, u32::MAX)] {
            assert!(
                matches!(
                    normalizer.target_dimensions(w, h),
                    Err(AnalysisError::InvalidParameter { .. })
                ),
                "{}x{} should be rejected", w, h
            );
        }

        // rejected before any output buffer is allocated
        assert!(matches!(
            normalizer.normalize(&RgbImage::new(1, 40_000)),
            Err(AnalysisError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_pixel_limit_boundary() {
        let normalizer = ImageNormalizer::new();
        // 600 x 26_666 = 15_999_600 pixels
        assert_eq!(normalizer.target_dimensions(600, 26_666).unwrap(), (600, 26_666));
        assert!(normalizer.target_dimensions(600, 26_667).is_err());
    }

    #[test]
    fn test_aspect_ratio_within_one_pixel() {
        let normalizer = ImageNormalizer::new();
        for &(w, h) in &[(1, 1), (7, 3), (123, 457), (640, 480), (4032, 3024), (999, 1001), (3, 20)] {
            let (nw, nh) = normalizer.target_dimensions(w, h).unwrap();
            assert_eq!(nw, TARGET_WIDTH);
            let exact_height = nw as f64 * h as f64 / w as f64;
            assert!(
                (nh as f64 - exact_height).abs() <= 1.0,
                "{}x{} -> {}x{}", w, h, nw, nh
            );
        }
    }

    #[test]
    fn test_normalize_produces_new_raster() {
        let normalizer = ImageNormalizer::with_width(8).unwrap();
        let image = RgbImage::from_pixel(4, 2, Rgb([40, 140, 40]));

        let resized = normalizer.normalize(&image).unwrap();
        assert_eq!(resized.dimensions(), (8, 4));
        assert_eq!(image.dimensions(), (4, 2));
    }

    #[test]
    fn test_zero_width_rejected() {
        assert!(ImageNormalizer::with_width(0).is_err());
        let normalizer = ImageNormalizer::new();
        assert!(matches!(
            normalizer.normalize(&RgbImage::new(0, 5)),
            Err(AnalysisError::EmptyImage { .. })
        ));
    }
}
