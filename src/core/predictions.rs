//! Prediction result types delivered through the pipeline's result channel.

use crate::core::errors::ClassifyError;
use std::sync::Arc;

/// A single classification prediction.
///
/// Produced by the result decoder from the model's raw per-class scores.
/// The confidence is the winning class's raw score scaled by 100 and rounded;
/// the model's outputs are trusted to already behave like per-class
/// probabilities, so no softmax or renormalization is applied. If the model
/// violates that contract, `confidence_percent` may fall outside `[0, 100]`
/// and is reported as-is rather than clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    /// Index of the winning class in the model's output ordering.
    pub class_id: usize,
    /// Winning score scaled to a percentage and rounded to an integer.
    pub confidence_percent: i32,
    /// Human-readable label for the winning class, when a label table was
    /// configured on the decoder.
    pub label: Option<Arc<str>>,
}

/// Outcome of one classify call: a prediction or a terminal failure.
///
/// Exactly one outcome is delivered per classify call, through the callback
/// supplied at pipeline construction.
pub type ClassifyOutcome = Result<Prediction, ClassifyError>;
