//! # plantid
//!
//! A Rust library for on-device plant image classification using ONNX models.
//! It converts an arbitrary-resolution RGB image into the tensor layout a
//! pretrained classifier expects, runs one CPU forward pass, and decodes the
//! per-class scores into a predicted class and confidence percentage.
//!
//! ## Components
//!
//! - **Model loading**: build an ONNX Runtime session from a packaged model asset
//! - **Preprocessing**: resize to the model's square input and normalize to `[0, 1]`
//! - **Inference**: a thin, serialized adapter around the ONNX Runtime session
//! - **Decoding**: arg-max over the class scores with an integer confidence percent
//!
//! ## Modules
//!
//! * [`core`] - Error handling, constants, tensor aliases, and the inference engine
//! * [`pipeline`] - The [`PlantIdentifier`](pipeline::PlantIdentifier) facade with
//!   background classification and callback delivery
//! * [`processors`] - Image preprocessing and score decoding
//! * [`utils`] - Image loading helpers and logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use plantid::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // The callback receives exactly one outcome per classify call.
//! let identifier = PlantIdentifier::new("models/plant_model.onnx", |outcome| {
//!     match outcome {
//!         Ok(prediction) => println!(
//!             "class {} ({}%)",
//!             prediction.class_id, prediction.confidence_percent
//!         ),
//!         Err(e) => eprintln!("classification failed: {e}"),
//!     }
//! });
//!
//! let image = load_image(Path::new("leaf.jpg"))?;
//! identifier.classify(image.into());
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod pipeline;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// Bring the essentials into scope with a single use statement:
///
/// ```rust
/// use plantid::prelude::*;
/// ```
///
/// Included items focus on the most common tasks:
/// - Pipeline facade (`PlantIdentifier`, `PlantIdentifierConfig`, `CancelToken`)
/// - Results (`Prediction`, `ClassifyOutcome`)
/// - Essential error type (`ClassifyError`)
/// - Basic image loading (`load_image`)
pub mod prelude {
    pub use crate::pipeline::{CancelToken, PlantIdentifier, PlantIdentifierConfig};

    pub use crate::core::{ClassifyError, ClassifyOutcome, Prediction};

    pub use crate::utils::load_image;
}
