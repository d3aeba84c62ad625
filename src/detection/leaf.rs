//! Leaf segmentation by HSV color range
//!
//! Implements background suppression that:
//! - Selects pixels whose HSV values fall in a green-leaf range
//! - Smooths the selection with a median filter to drop isolated pixels
//! - Zeroes every pixel outside the smoothed selection
//!
//! A second pass never re-admits a pixel: zeroed pixels have value 0, below
//! the range's lower value bound, and the median filter is monotone. Masks
//! whose outline is already stable under the median (straight edges, full
//! frames) come back unchanged.

use crate::color::{ColorConverter, HsvImage};
use crate::constants::segmentation::{
    LEAF_HSV_LOWER, LEAF_HSV_UPPER, LOW_COVERAGE_WARNING, MEDIAN_KERNEL_SIZE,
};
use crate::{AnalysisError, Result};
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::filter::median_filter;

const MASK_ON: u8 = 255;
const MASK_OFF: u8 = 0;

/// Leaf segmentation result
#[derive(Debug, Clone)]
pub struct LeafSegmentation {
    /// Input raster with background pixels set to zero
    pub masked: RgbImage,
    /// Smoothed binary mask (255 = leaf)
    pub mask: GrayImage,
    /// Fraction of pixels kept (0.0-1.0)
    pub coverage: f64,
}

/// Leaf segmenter implementing HSV range masking with median smoothing
#[derive(Debug, Clone)]
pub struct LeafSegmenter {
    converter: ColorConverter,
    lower: [u8; 3],
    upper: [u8; 3],
    kernel_size: u32,
}

impl Default for LeafSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl LeafSegmenter {
    /// Create a segmenter with the green-leaf range and a 5x5 median kernel
    pub fn new() -> Self {
        Self {
            converter: ColorConverter::new(),
            lower: LEAF_HSV_LOWER,
            upper: LEAF_HSV_UPPER,
            kernel_size: MEDIAN_KERNEL_SIZE,
        }
    }

    /// Create a segmenter with a custom range and kernel size
    pub fn with_params(lower: [u8; 3], upper: [u8; 3], kernel_size: u32) -> Result<Self> {
        if kernel_size == 0 || kernel_size % 2 == 0 {
            return Err(AnalysisError::InvalidParameter {
                parameter: "kernel_size".into(),
                value: kernel_size.to_string(),
            });
        }
        if lower.iter().zip(upper.iter()).any(|(lo, hi)| lo > hi) {
            return Err(AnalysisError::InvalidParameter {
                parameter: "hsv_range".into(),
                value: format!("{:?}..={:?}", lower, upper),
            });
        }
        Ok(Self {
            converter: ColorConverter::new(),
            lower,
            upper,
            kernel_size,
        })
    }

    /// Zero out the background of `image`
    pub fn segment(&self, image: &RgbImage) -> Result<LeafSegmentation> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(AnalysisError::EmptyImage { width, height });
        }

        let mask = self.leaf_mask(image);
        let masked = apply_mask(image, &mask)?;

        let kept = mask.pixels().filter(|p| p[0] != MASK_OFF).count();
        let coverage = kept as f64 / (width as u64 * height as u64) as f64;

        tracing::debug!(coverage, "leaf mask applied");
        if coverage < LOW_COVERAGE_WARNING {
            tracing::warn!(
                coverage,
                "leaf covers little of the frame; saturation and value will be deflated"
            );
        }

        Ok(LeafSegmentation {
            masked,
            mask,
            coverage,
        })
    }

    /// Smoothed binary mask of leaf-colored pixels
    pub fn leaf_mask(&self, image: &RgbImage) -> GrayImage {
        let hsv = self.converter.to_hsv_image(image);
        let raw = self.range_mask(&hsv);
        let radius = self.kernel_size / 2;
        median_filter(&raw, radius, radius)
    }

    /// Binary mask of pixels inside the inclusive HSV range
    fn range_mask(&self, hsv: &HsvImage) -> GrayImage {
        let mut mask = GrayImage::new(hsv.width(), hsv.height());
        for (pixel, out) in hsv.pixels().zip(mask.pixels_mut()) {
            let inside = (0..3).all(|c| pixel[c] >= self.lower[c] && pixel[c] <= self.upper[c]);
            *out = Luma([if inside { MASK_ON } else { MASK_OFF }]);
        }
        mask
    }
}

/// Keep pixels where `mask` is non-zero, zero all others
pub fn apply_mask(image: &RgbImage, mask: &GrayImage) -> Result<RgbImage> {
    if image.dimensions() != mask.dimensions() {
        return Err(AnalysisError::ProcessingError(format!(
            "mask is {:?} but image is {:?}",
            mask.dimensions(),
            image.dimensions()
        )));
    }

    let mut masked = image.clone();
    for (pixel, m) in masked.pixels_mut().zip(mask.pixels()) {
        if m[0] == MASK_OFF {
            *pixel = Rgb([0, 0, 0]);
        }
    }
    Ok(masked)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEAF: Rgb<u8> = Rgb([40, 140, 40]);
    const PAPER: Rgb<u8> = Rgb([250, 250, 250]);

    /// Green rectangle on white paper with one stray green speck
    fn leaf_on_paper() -> RgbImage {
        let mut image = RgbImage::from_fn(40, 30, |x, y| {
            if (10..30).contains(&x) && (8..22).contains(&y) {
                LEAF
            } else {
                PAPER
            }
        });
        image.put_pixel(2, 2, LEAF);
        image
    }

    #[test]
    fn test_segmenter_creation() {
        let segmenter = LeafSegmenter::new();
        assert_eq!(segmenter.lower, LEAF_HSV_LOWER);
        assert_eq!(segmenter.upper, LEAF_HSV_UPPER);
        assert_eq!(segmenter.kernel_size, MEDIAN_KERNEL_SIZE);
    }

    #[test]
    fn test_invalid_params() {
        assert!(LeafSegmenter::with_params(LEAF_HSV_LOWER, LEAF_HSV_UPPER, 4).is_err());
        assert!(LeafSegmenter::with_params([50, 0, 0], [40, 255, 255], 5).is_err());
        assert!(LeafSegmenter::with_params(LEAF_HSV_LOWER, LEAF_HSV_UPPER, 3).is_ok());
    }

    #[test]
    fn test_range_mask_is_inclusive() {
        let segmenter = LeafSegmenter::new();
        let mut hsv = HsvImage::new(3, 1);
        hsv.put_pixel(0, 0, Rgb(LEAF_HSV_LOWER));
        hsv.put_pixel(1, 0, Rgb(LEAF_HSV_UPPER));
        hsv.put_pixel(2, 0, Rgb([19, 200, 200]));

        let mask = segmenter.range_mask(&hsv);
        assert_eq!(mask.get_pixel(0, 0)[0], MASK_ON);
        assert_eq!(mask.get_pixel(1, 0)[0], MASK_ON);
        assert_eq!(mask.get_pixel(2, 0)[0], MASK_OFF);
    }

    #[test]
    fn test_background_zeroed_leaf_kept() {
        let segmenter = LeafSegmenter::new();
        let result = segmenter.segment(&leaf_on_paper()).unwrap();

        assert_eq!(result.masked.get_pixel(20, 15), &LEAF);
        assert_eq!(result.masked.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(result.masked.get_pixel(39, 29), &Rgb([0, 0, 0]));
        // isolated speck removed by the median filter
        assert_eq!(result.masked.get_pixel(2, 2), &Rgb([0, 0, 0]));
        // the 5x5 median rounds off three pixels at each rectangle corner
        assert_eq!(result.masked.get_pixel(10, 8), &Rgb([0, 0, 0]));
        assert_eq!(result.masked.get_pixel(12, 8), &LEAF);

        let expected = (20.0 * 14.0 - 4.0 * 3.0) / (40.0 * 30.0);
        assert!((result.coverage - expected).abs() < 1e-9);
    }

    #[test]
    fn test_masking_is_idempotent_on_straight_edges() {
        // left half leaf, right half paper with scattered specks
        let mut image = RgbImage::from_fn(32, 20, |x, _| if x < 16 { LEAF } else { PAPER });
        image.put_pixel(25, 5, LEAF);
        image.put_pixel(20, 14, LEAF);

        let segmenter = LeafSegmenter::new();
        let once = segmenter.segment(&image).unwrap().masked;
        let twice = segmenter.segment(&once).unwrap().masked;
        assert_eq!(once, twice);
    }

    #[test]
    fn test_masking_never_readmits_pixels() {
        let segmenter = LeafSegmenter::new();
        let first = segmenter.segment(&leaf_on_paper()).unwrap();
        let second = segmenter.segment(&first.masked).unwrap();

        for (a, b) in first.mask.pixels().zip(second.mask.pixels()) {
            assert!(b[0] <= a[0]);
        }
        assert!(second.coverage <= first.coverage);
    }

    #[test]
    fn test_black_frame_fully_masked() {
        let segmenter = LeafSegmenter::new();
        let result = segmenter.segment(&RgbImage::new(12, 12)).unwrap();
        assert_eq!(result.coverage, 0.0);
    }

    #[test]
    fn test_apply_mask() {
        let image = RgbImage::from_pixel(2, 1, Rgb([9, 8, 7]));
        let mut mask = GrayImage::new(2, 1);
        mask.put_pixel(1, 0, Luma([MASK_ON]));

        let masked = apply_mask(&image, &mask).unwrap();
        assert_eq!(masked.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(masked.get_pixel(1, 0), &Rgb([9, 8, 7]));

        assert!(apply_mask(&image, &GrayImage::new(1, 1)).is_err());
    }
}
