//! Helpers for working directly with ONNX Runtime sessions.

use crate::core::errors::ClassifyError;
use ort::logging::LogLevel;
use ort::session::Session;
use std::path::Path;

/// Builds an ONNX Runtime session from a packaged model asset.
///
/// The runtime owns the mapped model memory for the session's lifetime; the
/// asset is never copied into crate-managed buffers or mutated. Default CPU
/// execution is used.
pub fn load_session(model_path: impl AsRef<Path>) -> Result<Session, ClassifyError> {
    let path = model_path.as_ref();
    let session = Session::builder()
        .and_then(|b| b.with_log_level(LogLevel::Error))
        .and_then(|b| b.commit_from_file(path))
        .map_err(|e| {
            ClassifyError::model_load(
                path,
                "failed to create ONNX session",
                Some(e),
            )
        })?;
    Ok(session)
}
