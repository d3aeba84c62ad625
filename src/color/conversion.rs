//! RGB to HSV conversion on the 8-bit scale
//!
//! Hue is stored as degrees halved so it fits a byte (0-179, wrapping at
//! 180). Saturation and value are scaled to 0-255. Every threshold in the
//! crate is expressed on this scale.
//!
//! Conversion is done in floating point and rounded. Value is exact; hue and
//! saturation agree with the common 12-bit fixed-point formulation to within
//! one rounding step, so a handful of colors right on a mask boundary may
//! land on the other side of it.

use image::{ImageBuffer, Rgb, RgbImage};
use palette::{FromColor, Hsv, Srgb};

/// HSV raster; channel 0 is hue, 1 saturation, 2 value
pub type HsvImage = ImageBuffer<Rgb<u8>, Vec<u8>>;

/// RGB to HSV converter
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorConverter;

impl ColorConverter {
    /// Create a new converter
    pub fn new() -> Self {
        Self
    }

    /// Convert one RGB pixel to `[hue, saturation, value]`
    ///
    /// Achromatic pixels (including black) get hue 0 and saturation 0.
    pub fn rgb_to_hsv(&self, r: u8, g: u8, b: u8) -> [u8; 3] {
        let srgb: Srgb<f32> = Srgb::new(r, g, b).into_format();
        let hsv: Hsv = Hsv::from_color(srgb);

        let half_degrees = (hsv.hue.into_positive_degrees() / 2.0).round() as u16;
        let hue = if half_degrees >= 180 { 0 } else { half_degrees as u8 };
        let saturation = (hsv.saturation * 255.0).round().clamp(0.0, 255.0) as u8;
        let value = (hsv.value * 255.0).round().clamp(0.0, 255.0) as u8;

        [hue, saturation, value]
    }

    /// Convert a whole raster to HSV
    pub fn to_hsv_image(&self, image: &RgbImage) -> HsvImage {
        let mut hsv = HsvImage::new(image.width(), image.height());
        for (src, dst) in image.pixels().zip(hsv.pixels_mut()) {
            let [r, g, b] = src.0;
            *dst = Rgb(self.rgb_to_hsv(r, g, b));
        }
        hsv
    }
}
