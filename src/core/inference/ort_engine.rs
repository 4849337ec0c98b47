//! Inference engine adapter around an ONNX Runtime session.
//!
//! [`OrtEngine`] owns the session built from the packaged model asset and
//! performs one blocking, CPU-bound forward pass per call. The session is
//! kept behind a `Mutex` because ONNX Runtime sessions are not safe for
//! concurrent forward passes; concurrent callers serialize on the lock.

use crate::core::errors::{ClassifyError, SimpleError};
use crate::core::{Tensor2D, Tensor4D};
use ort::session::Session;
use ort::value::{TensorRef, ValueType};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Thin boundary around the ONNX Runtime session for classification models.
///
/// Loaded once per pipeline instance and shared read-only across classify
/// calls. Dropping the engine releases the session and the mapped model
/// memory; the owning pipeline guarantees no forward pass is in flight when
/// that happens.
pub struct OrtEngine {
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
    model_path: PathBuf,
    model_name: String,
}

impl std::fmt::Debug for OrtEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrtEngine")
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .field("model_path", &self.model_path)
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl OrtEngine {
    /// Loads the model asset and constructs the engine bound to it.
    ///
    /// Input and output tensor names are discovered from the session's
    /// declared signature. Failure conditions: asset missing or unreadable,
    /// malformed model binary, engine rejecting the model, or a model with
    /// no declared inputs/outputs.
    pub fn load(model_path: impl AsRef<Path>) -> Result<Self, ClassifyError> {
        let path = model_path.as_ref();
        let session = super::session::load_session(path)?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .ok_or_else(|| {
                ClassifyError::model_load(
                    path,
                    "model declares no inputs - file may be corrupted",
                    None::<SimpleError>,
                )
            })?;
        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| {
                ClassifyError::model_load(
                    path,
                    "model declares no outputs - file may be corrupted",
                    None::<SimpleError>,
                )
            })?;

        let model_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown_model")
            .to_string();

        Ok(OrtEngine {
            session: Mutex::new(session),
            input_name,
            output_name,
            model_path: path.to_path_buf(),
            model_name,
        })
    }

    /// Returns the model name associated with this engine.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Attempts to retrieve the declared input tensor shape from the session.
    ///
    /// Returns a vector of dimensions if available. Dynamic dimensions
    /// (e.g., -1) are returned as-is.
    pub fn input_shape(&self) -> Option<Vec<i64>> {
        let session_guard = self.session.lock().ok()?;
        let input = session_guard.inputs.first()?;
        match &input.input_type {
            ValueType::Tensor { shape, .. } => Some(shape.iter().copied().collect()),
            _ => None,
        }
    }

    /// Runs one synchronous forward pass and returns the 2D output tensor.
    ///
    /// Blocking and CPU-bound; performs no I/O. The output must be a 2D
    /// `(batch, classes)` tensor; anything else is reported as a shape error
    /// against the model contract. Failures are never retried.
    pub fn infer(&self, x: &Tensor4D) -> Result<Tensor2D, ClassifyError> {
        let input_shape = x.shape().to_vec();

        let input_tensor = TensorRef::from_array_view(x.view()).map_err(|e| {
            ClassifyError::inference(
                &self.model_name,
                format!("failed to convert input tensor with shape {input_shape:?}"),
                e,
            )
        })?;

        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let mut session_guard = self.session.lock().map_err(|_| {
            ClassifyError::inference(
                &self.model_name,
                "failed to acquire session lock",
                SimpleError::new("session lock acquisition failed"),
            )
        })?;

        let outputs = session_guard.run(inputs).map_err(|e| {
            ClassifyError::inference(
                &self.model_name,
                format!(
                    "forward pass failed with input '{}' -> output '{}'",
                    self.input_name, self.output_name
                ),
                e,
            )
        })?;

        let output = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| {
                ClassifyError::inference(
                    &self.model_name,
                    format!("failed to extract output tensor '{}' as f32", self.output_name),
                    e,
                )
            })?;
        let (output_shape, output_data) = output;

        if output_shape.len() != 2 {
            return Err(ClassifyError::shape(
                "output_validation",
                &[2],
                &[output_shape.len()],
            ));
        }

        let batch_size = output_shape[0] as usize;
        let num_classes = output_shape[1] as usize;
        // A zero-row output would leave the decoder nothing to read.
        if batch_size != 1 {
            return Err(ClassifyError::shape(
                "output_validation",
                &[1, num_classes],
                &[batch_size, num_classes],
            ));
        }
        let expected_len = batch_size * num_classes;
        if output_data.len() != expected_len {
            return Err(ClassifyError::shape(
                "output_extraction",
                &[expected_len],
                &[output_data.len()],
            ));
        }

        let scores = Tensor2D::from_shape_vec((batch_size, num_classes), output_data.to_vec())?;
        Ok(scores)
    }
}
