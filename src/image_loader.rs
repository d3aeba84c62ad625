//! Image loading for leaf photographs
//!
//! Decodes any raster format the `image` crate recognizes (JPEG, PNG, WebP,
//! TIFF, BMP, ...) by sniffing the file content rather than trusting the
//! extension.
//!
//! ## Design
//!
//! All images are returned as 8-bit RGB. EXIF orientation is applied during
//! decoding so portrait phone photos are normalized to the same width as
//! landscape ones.

use crate::error::{AnalysisError, Result};
use image::{DynamicImage, ImageDecoder, ImageReader, ImageResult, RgbImage};
use std::io::{BufRead, Cursor, Seek};
use std::path::Path;

/// Load an image from disk as an RGB raster
///
/// # Errors
///
/// Returns `AnalysisError::ImageLoadError` carrying `path` if:
/// - File cannot be opened
/// - Format is not recognized or decoding fails
/// - The decoded image has no pixels
///
/// # Example
///
/// ```rust,no_run
/// use leaf_health::image_loader::load_image;
/// use std::path::Path;
///
/// let leaf = load_image(Path::new("leaf.jpg"))?;
/// println!("Loaded image: {}x{}", leaf.width(), leaf.height());
/// # Ok::<(), leaf_health::AnalysisError>(())
/// ```
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| AnalysisError::image_load(path, "Failed to open image file", e))?;
    decode_image(&bytes, path)
}

/// Decode an in-memory encoded image as an RGB raster
///
/// `source` only labels errors; nothing is read from it.
pub fn decode_image(bytes: &[u8], source: &Path) -> Result<RgbImage> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| AnalysisError::image_load(source, "Failed to read image header", e))?;

    let raster = decode_oriented(reader)
        .map_err(|e| AnalysisError::image_load(source, "Failed to decode image", e))?;

    if raster.width() == 0 || raster.height() == 0 {
        return Err(AnalysisError::ImageLoadError {
            path: source.to_path_buf(),
            message: format!("Image has no pixels ({}x{})", raster.width(), raster.height()),
            source: None,
        });
    }

    tracing::debug!(
        path = %source.display(),
        width = raster.width(),
        height = raster.height(),
        "decoded image"
    );
    Ok(raster)
}

fn decode_oriented<R: BufRead + Seek>(reader: ImageReader<R>) -> ImageResult<RgbImage> {
    let mut decoder = reader.into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut image = DynamicImage::from_decoder(decoder)?;
    image.apply_orientation(orientation);
    Ok(image.to_rgb8())
}
