//! Decoding raw classification scores into a prediction.

use crate::core::errors::ClassifyError;
use crate::core::predictions::Prediction;
use std::sync::Arc;

/// Decodes the model's raw per-class scores into a [`Prediction`].
///
/// Performs an arg-max scan over the scores, selecting the index with the
/// strictly greatest value; ties resolve to the first-encountered (lowest)
/// index. The decoder applies no softmax or renormalization: the packaged
/// model's raw outputs are calibrated as per-class probabilities in `[0, 1]`,
/// and adding normalization here would change that calibration. If the model
/// violates the contract, out-of-range confidence values surface verbatim.
#[derive(Debug, Clone)]
pub struct ScoreDecoder {
    num_classes: usize,
    labels: Option<Vec<Arc<str>>>,
}

impl ScoreDecoder {
    /// Creates a decoder expecting `num_classes` scores, without labels.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `num_classes` is zero.
    pub fn new(num_classes: usize) -> Result<Self, ClassifyError> {
        if num_classes == 0 {
            return Err(ClassifyError::config(
                "decoder class count must be greater than 0",
            ));
        }
        Ok(Self {
            num_classes,
            labels: None,
        })
    }

    /// Creates a decoder that attaches a label to each prediction.
    ///
    /// The vector index corresponds to the class ID.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `labels` is empty or its length
    /// disagrees with the class count implied by it.
    pub fn with_labels(labels: Vec<String>) -> Result<Self, ClassifyError> {
        if labels.is_empty() {
            return Err(ClassifyError::config("label table must not be empty"));
        }
        let num_classes = labels.len();
        Ok(Self {
            num_classes,
            labels: Some(labels.into_iter().map(Arc::from).collect()),
        })
    }

    /// Returns the number of classes this decoder expects.
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Decodes a score vector into a prediction.
    ///
    /// Deterministic and idempotent: decoding the same scores twice yields
    /// the same prediction. A score vector whose length disagrees with the
    /// configured class count is a model/configuration contract violation
    /// and reported as a shape error.
    pub fn decode(&self, scores: &[f32]) -> Result<Prediction, ClassifyError> {
        if scores.len() != self.num_classes {
            return Err(ClassifyError::shape(
                "score_decoding",
                &[self.num_classes],
                &[scores.len()],
            ));
        }

        let mut best_id = 0;
        let mut best_score = scores[0];
        for (id, &score) in scores.iter().enumerate().skip(1) {
            if score > best_score {
                best_id = id;
                best_score = score;
            }
        }

        // Rounded in f64 so e.g. 0.9f32 lands on 90, not 89.
        let confidence_percent = (f64::from(best_score) * 100.0).round() as i32;

        Ok(Prediction {
            class_id: best_id,
            confidence_percent,
            label: self
                .labels
                .as_ref()
                .and_then(|labels| labels.get(best_id).cloned()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores_with_peak(len: usize, peak_id: usize, peak: f32) -> Vec<f32> {
        let mut scores = vec![0.01; len];
        scores[peak_id] = peak;
        scores
    }

    #[test]
    fn test_argmax_selects_highest_score() {
        let decoder = ScoreDecoder::new(30).unwrap();
        assert_eq!(decoder.num_classes(), 30);
        let mut scores = scores_with_peak(30, 1, 0.9);
        scores[0] = 0.1;
        scores[2] = 0.05;

        let prediction = decoder.decode(&scores).unwrap();
        assert_eq!(prediction.class_id, 1);
        assert_eq!(prediction.confidence_percent, 90);
        assert!(prediction.label.is_none());
    }

    #[test]
    fn test_tie_resolves_to_lowest_index() {
        let decoder = ScoreDecoder::new(30).unwrap();
        let mut scores = vec![0.2; 30];
        scores[0] = 0.5;
        scores[1] = 0.5;

        let prediction = decoder.decode(&scores).unwrap();
        assert_eq!(prediction.class_id, 0);
    }

    #[test]
    fn test_decode_is_idempotent() {
        let decoder = ScoreDecoder::new(30).unwrap();
        let scores = scores_with_peak(30, 17, 0.73);

        let first = decoder.decode(&scores).unwrap();
        let second = decoder.decode(&scores).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_length_mismatch_is_shape_error() {
        let decoder = ScoreDecoder::new(30).unwrap();
        let scores = vec![0.5; 10];

        let err = decoder.decode(&scores).unwrap_err();
        assert!(matches!(err, ClassifyError::Shape { .. }));
    }

    #[test]
    fn test_out_of_range_score_surfaces() {
        // Contract violation by the model must not be concealed.
        let decoder = ScoreDecoder::new(3).unwrap();
        let prediction = decoder.decode(&[0.1, 1.5, 0.2]).unwrap();
        assert_eq!(prediction.class_id, 1);
        assert_eq!(prediction.confidence_percent, 150);
    }

    #[test]
    fn test_labels_attached_to_prediction() {
        let decoder = ScoreDecoder::with_labels(vec![
            "aloe vera".to_string(),
            "basil".to_string(),
            "fern".to_string(),
        ])
        .unwrap();

        let prediction = decoder.decode(&[0.1, 0.2, 0.7]).unwrap();
        assert_eq!(prediction.label.as_deref(), Some("fern"));
    }

    #[test]
    fn test_zero_classes_rejected() {
        assert!(ScoreDecoder::new(0).is_err());
        assert!(ScoreDecoder::with_labels(Vec::new()).is_err());
    }
}
