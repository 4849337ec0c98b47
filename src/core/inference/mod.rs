//! Structures and helpers for ONNX Runtime inference.
//!
//! This module centralizes session construction along with the low level
//! inference engine adapter the pipeline drives for each forward pass.

pub mod ort_engine;
pub mod session;

pub use ort_engine::OrtEngine;
pub use session::load_session;
