//! Configuration for the classification pipeline.

use crate::core::errors::ClassifyError;
use crate::core::{MODEL_INPUT_SIZE, NUM_PLANT_CLASSES};
use serde::{Deserialize, Serialize};

/// Configuration for a [`PlantIdentifier`](super::PlantIdentifier).
///
/// The defaults match the packaged plant model's contract: a 128x128 RGB
/// input and 30 output classes. Change them only when swapping the model
/// asset for one with a different signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantIdentifierConfig {
    /// Side length of the square model input, in pixels.
    pub input_size: u32,
    /// Number of classes the model scores.
    pub num_classes: usize,
    /// Optional label table; index = class ID. When present, its length must
    /// equal `num_classes` and each prediction carries the winning label.
    pub labels: Option<Vec<String>>,
}

impl Default for PlantIdentifierConfig {
    fn default() -> Self {
        Self {
            input_size: MODEL_INPUT_SIZE,
            num_classes: NUM_PLANT_CLASSES,
            labels: None,
        }
    }
}

impl PlantIdentifierConfig {
    /// Creates a configuration with the packaged model's defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the label table.
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the input size or class count is
    /// zero, or if a label table is present with the wrong length.
    pub fn validate(&self) -> Result<(), ClassifyError> {
        if self.input_size == 0 {
            return Err(ClassifyError::config("input_size must be greater than 0"));
        }
        if self.num_classes == 0 {
            return Err(ClassifyError::config("num_classes must be greater than 0"));
        }
        if let Some(labels) = &self.labels {
            if labels.len() != self.num_classes {
                return Err(ClassifyError::config(format!(
                    "label table has {} entries but num_classes is {}",
                    labels.len(),
                    self.num_classes
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_model_contract() {
        let config = PlantIdentifierConfig::new();
        assert_eq!(config.input_size, 128);
        assert_eq!(config.num_classes, 30);
        assert!(config.labels.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_label_table_length_checked() {
        let config = PlantIdentifierConfig::new().with_labels(vec!["only one".to_string()]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = PlantIdentifierConfig {
            input_size: 128,
            num_classes: 2,
            labels: Some(vec!["aloe vera".to_string(), "basil".to_string()]),
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: PlantIdentifierConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.num_classes, 2);
        assert_eq!(parsed.labels.unwrap()[1], "basil");
    }
}
