//! Utility functions for image loading and conversion.
//!
//! The pipeline accepts already-decoded images; these helpers cover hosts
//! that start from a file path instead. Decoding failures stay on the host
//! side of the boundary and never reach the preprocessor.

use crate::core::errors::ClassifyError;
use image::{DynamicImage, RgbImage};

/// Converts a DynamicImage to an RgbImage.
///
/// Guarantees a uniform 8-bit-per-channel RGB byte layout for pixel
/// extraction, whatever representation the source decoded to. Alpha is
/// discarded.
pub fn dynamic_to_rgb(img: DynamicImage) -> RgbImage {
    img.to_rgb8()
}

/// Loads an image from a file path.
///
/// Handles any format supported by the image crate.
///
/// # Errors
///
/// Returns `ClassifyError::ImageLoad` if the file cannot be opened or
/// decoded.
pub fn load_image(path: &std::path::Path) -> Result<RgbImage, ClassifyError> {
    let img = image::open(path).map_err(ClassifyError::ImageLoad)?;
    Ok(dynamic_to_rgb(img))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{LumaA, Rgba};
    use std::path::Path;

    #[test]
    fn test_load_image_missing_file() {
        let err = load_image(Path::new("no/such/leaf.png")).unwrap_err();
        assert!(matches!(err, ClassifyError::ImageLoad(_)));
    }

    #[test]
    fn test_dynamic_to_rgb_discards_alpha() {
        let rgba = image::RgbaImage::from_pixel(4, 4, Rgba([9, 8, 7, 0]));
        let rgb = dynamic_to_rgb(DynamicImage::ImageRgba8(rgba));
        assert_eq!(rgb.get_pixel(0, 0).0, [9, 8, 7]);
    }

    #[test]
    fn test_dynamic_to_rgb_expands_grayscale() {
        let gray = image::GrayAlphaImage::from_pixel(2, 2, LumaA([42, 255]));
        let rgb = dynamic_to_rgb(DynamicImage::ImageLumaA8(gray));
        assert_eq!(rgb.get_pixel(1, 1).0, [42, 42, 42]);
    }
}
