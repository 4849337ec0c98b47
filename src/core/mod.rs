//! The core module of the classification pipeline.
//!
//! This module contains the fundamental components of the pipeline, including:
//! - Constants describing the model contract
//! - Error handling
//! - Inference engine integration
//! - Prediction result types
//!
//! It also provides re-exports of commonly used types for convenience.

pub mod constants;
pub mod errors;
pub mod inference;
pub mod predictions;

pub use constants::*;
pub use errors::{ClassifyError, SimpleError};
pub use inference::{OrtEngine, load_session};
pub use predictions::{ClassifyOutcome, Prediction};

/// A 2D tensor of 32-bit floats, shaped `(batch, classes)` for model outputs.
pub type Tensor2D = ndarray::Array2<f32>;

/// A 4D tensor of 32-bit floats, shaped `(batch, height, width, channels)`
/// for channel-interleaved model inputs.
pub type Tensor4D = ndarray::Array4<f32>;
