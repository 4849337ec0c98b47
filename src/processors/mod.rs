//! Image preprocessing and score decoding for the classification pipeline.
//!
//! # Modules
//!
//! * `preprocess` - Converting images into the model's normalized input tensor
//! * `decode` - Decoding raw per-class scores into a prediction

mod decode;
mod preprocess;

pub use decode::ScoreDecoder;
pub use preprocess::Preprocessor;
