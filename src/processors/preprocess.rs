//! Image preprocessing for classification models.
//!
//! Converts an arbitrary-resolution image into the fixed-size, fixed-layout,
//! normalized tensor the model expects. Each step follows a fixed policy:
//! convert to 8-bit RGB, resize to the model's square input with bilinear
//! interpolation, then emit row-major channel-interleaved floats in `[0, 1]`.

use crate::core::errors::ClassifyError;
use crate::core::{MODEL_INPUT_CHANNELS, Tensor4D};
use image::{DynamicImage, imageops, imageops::FilterType};

/// Converts images into the model's normalized NHWC input tensor.
///
/// The output tensor always has shape `(1, side, side, 3)` regardless of the
/// source image's resolution or color depth. Aspect ratio is not preserved:
/// the model contract mandates a square input, so stretching is accepted.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    side: u32,
}

impl Preprocessor {
    /// Creates a new preprocessor targeting a `side x side` model input.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `side` is zero.
    pub fn new(side: u32) -> Result<Self, ClassifyError> {
        if side == 0 {
            return Err(ClassifyError::config(
                "preprocessor input side must be greater than 0",
            ));
        }
        Ok(Self { side })
    }

    /// Returns the side length of the square tensor this preprocessor emits.
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Converts an image into the model's input tensor.
    ///
    /// Steps, in order:
    /// 1. convert to 8-bit-per-channel RGB, discarding alpha;
    /// 2. resize to exactly `side x side` with bilinear interpolation;
    /// 3. for every pixel in row-major order, divide R, G, B by 255.0 and
    ///    append the floats interleaved.
    ///
    /// The result is a contiguous native-endian f32 buffer of length
    /// `side * side * 3`, the binary contract with the inference engine.
    /// No error conditions are expected for a well-formed decoded image.
    pub fn process(&self, image: &DynamicImage) -> Result<Tensor4D, ClassifyError> {
        let rgb = image.to_rgb8();
        let resized = imageops::resize(&rgb, self.side, self.side, FilterType::Triangle);

        let side = self.side as usize;
        let mut data = Vec::with_capacity(side * side * MODEL_INPUT_CHANNELS);
        for pixel in resized.pixels() {
            data.push(f32::from(pixel[0]) / 255.0);
            data.push(f32::from(pixel[1]) / 255.0);
            data.push(f32::from(pixel[2]) / 255.0);
        }

        let tensor = Tensor4D::from_shape_vec((1, side, side, MODEL_INPUT_CHANNELS), data)?;
        Ok(tensor)
    }
}
