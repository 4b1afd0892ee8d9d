use serde::{Deserialize, Serialize};

/// Configuration parameters for the training loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of passes over the dataset
    pub epochs: u32,
    /// Record and log the error every this many epochs
    pub log_interval: u32,
    /// Visit samples in a new random order every epoch instead of dataset order
    pub shuffle: bool,
    /// Seed for the shuffling order
    pub seed: Option<u64>,
    /// Draw a progress bar on the terminal
    pub show_progress: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 10_000,
            log_interval: 1_000,
            shuffle: false,
            seed: None,
            show_progress: true,
        }
    }
}

impl TrainingConfig {
    /// Default settings with a different number of epochs.
    pub fn with_epochs(epochs: u32) -> Self {
        Self {
            epochs,
            ..Self::default()
        }
    }
}
