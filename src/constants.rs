//! Fixed processing parameters and classification thresholds
//!
//! All HSV quantities use the 8-bit scale: hue 0-179 (degrees halved),
//! saturation and value 0-255. Thresholds below are expressed on that scale
//! and are not configurable at runtime.

/// HSV channel ranges on the 8-bit scale
pub mod hsv {
    /// Largest hue value (degrees / 2, wrapping at 180)
    pub const HUE_MAX: u8 = 179;

    /// Largest saturation value
    pub const SATURATION_MAX: u8 = 255;

    /// Largest value (brightness) value
    pub const VALUE_MAX: u8 = 255;
}

/// Image normalization parameters
pub mod normalization {
    /// Canonical width every raster is rescaled to before feature extraction
    pub const TARGET_WIDTH: u32 = 600;

    /// Largest normalized raster accepted, in pixels (16MP)
    pub const MAX_PROCESSING_PIXELS: u64 = 16_000_000;
}

/// Leaf segmentation parameters
pub mod segmentation {
    /// Inclusive lower HSV bound of leaf-colored pixels
    pub const LEAF_HSV_LOWER: [u8; 3] = [20, 40, 20];

    /// Inclusive upper HSV bound of leaf-colored pixels
    pub const LEAF_HSV_UPPER: [u8; 3] = [120, 255, 255];

    /// Median filter kernel size (odd)
    pub const MEDIAN_KERNEL_SIZE: u32 = 5;

    /// Leaf coverage below which a warning is logged
    pub const LOW_COVERAGE_WARNING: f64 = 0.10;
}

/// Healthy baseline parameters
pub mod baseline {
    /// Number of reference photographs averaged into the baseline
    pub const REFERENCE_IMAGE_COUNT: usize = 3;
}

/// Classification thresholds on baseline-minus-test differences
pub mod thresholds {
    /// Healthy: |hue difference| must stay below this
    pub const HEALTHY_MAX_HUE_DIFF: f64 = 6.0;

    /// Healthy: |saturation difference| must stay below this
    pub const HEALTHY_MAX_SATURATION_DIFF: f64 = 10.0;

    /// Healthy: |value difference| must stay below this
    pub const HEALTHY_MAX_VALUE_DIFF: f64 = 5.0;

    /// Both deficiencies: saturation difference must fall below this
    pub const DEFICIENCY_SATURATION_DIFF: f64 = -40.0;

    /// Nitrogen deficiency: value difference must fall below this
    pub const NITROGEN_VALUE_DIFF: f64 = -40.0;

    /// Hue difference splitting nitrogen (below) from potassium (at or above)
    pub const NITROGEN_HUE_DIFF: f64 = -25.0;

    /// Potassium deficiency: value difference must fall below this
    pub const POTASSIUM_VALUE_DIFF: f64 = -10.0;
}
