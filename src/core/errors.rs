//! Error types for the classification pipeline.
//!
//! This module defines the error taxonomy used across the pipeline: asset
//! errors surfaced at model load time, shape errors for tensor contract
//! violations, and engine errors for faults inside the inference runtime.
//! Every failure is recovered into a value delivered through the result
//! channel; no fault crosses the crate boundary unhandled.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Enum representing the errors that can occur in the classification pipeline.
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// The model asset could not be opened or the engine rejected it.
    ///
    /// Surfaced once at load time; the owning pipeline then becomes
    /// permanently unusable until reconstructed.
    #[error("model load ({path}): {context}")]
    ModelLoad {
        /// Path of the model asset that failed to load.
        path: PathBuf,
        /// Additional context about the failure.
        context: String,
        /// The underlying error, if one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error occurred while loading an image from disk.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// A tensor did not match the model's declared contract.
    ///
    /// Indicates a configuration bug (wrong model file or wrong constants);
    /// fatal to the classify call it occurs in, never retried.
    #[error("shape mismatch in {context}: expected {expected:?}, got {actual:?}")]
    Shape {
        /// The operation in which the mismatch was detected.
        context: String,
        /// The expected dimensions.
        expected: Vec<usize>,
        /// The actual dimensions.
        actual: Vec<usize>,
    },

    /// Opaque failure from the inference runtime during execution.
    ///
    /// Reported verbatim to the caller and not retried, since rerunning the
    /// same input would deterministically fail again.
    #[error("inference ({model}): {context}")]
    Inference {
        /// Name of the model that was executing.
        model: String,
        /// Additional context about the failure.
        context: String,
        /// The underlying error from the runtime.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The pipeline failed to load its model and refuses classification.
    ///
    /// Carries the stored load failure reason; every classify call on a
    /// failed pipeline receives the same reason.
    #[error("pipeline unavailable: {reason}")]
    Unavailable {
        /// The rendered reason from the original load failure.
        reason: String,
    },

    /// The classify call was cancelled via its [`CancelToken`](crate::pipeline::CancelToken)
    /// before the forward pass ran.
    #[error("classification cancelled")]
    Cancelled,

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    Config {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error from tensor operations.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),
}

impl ClassifyError {
    /// Creates a model load error with path context and an optional source.
    pub fn model_load(
        path: &Path,
        context: impl Into<String>,
        source: Option<impl std::error::Error + Send + Sync + 'static>,
    ) -> Self {
        Self::ModelLoad {
            path: path.to_path_buf(),
            context: context.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Creates a shape mismatch error for tensor contract violations.
    pub fn shape(context: impl Into<String>, expected: &[usize], actual: &[usize]) -> Self {
        Self::Shape {
            context: context.into(),
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    /// Creates an inference error carrying the model name and a source error.
    pub fn inference(
        model: impl Into<String>,
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Inference {
            model: model.into(),
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Creates a configuration error with the given message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// A minimal string-backed error for wrapping plain messages as error sources.
#[derive(Debug)]
pub struct SimpleError {
    message: String,
}

impl SimpleError {
    /// Creates a new SimpleError with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SimpleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SimpleError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error_message() {
        let err = ClassifyError::shape("output_validation", &[1, 30], &[1, 10]);
        let rendered = err.to_string();
        assert!(rendered.contains("output_validation"));
        assert!(rendered.contains("[1, 30]"));
        assert!(rendered.contains("[1, 10]"));
    }

    #[test]
    fn test_model_load_error_without_source() {
        let err = ClassifyError::model_load(
            Path::new("missing.onnx"),
            "failed to create ONNX session",
            None::<std::io::Error>,
        );
        assert!(err.to_string().contains("missing.onnx"));
    }

    #[test]
    fn test_unavailable_carries_reason() {
        let err = ClassifyError::Unavailable {
            reason: "model load (x.onnx): asset not found".to_string(),
        };
        assert!(err.to_string().contains("asset not found"));
    }
}
