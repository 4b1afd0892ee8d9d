use thiserror::Error;

/// Errors raised by the network when a precondition is violated.
///
/// None of these are recoverable numeric failures: they signal a caller
/// passing the wrong shape or an impossible hyperparameter.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Invalid {layer} layer size: must have at least one neuron")]
    InvalidLayerSize { layer: &'static str },
    #[error("Invalid learning rate {0}: must be positive and finite")]
    InvalidLearningRate(f64),
    #[error("Invalid dropout rate {0}: must be in [0, 1)")]
    InvalidDropoutRate(f64),
    #[error("Invalid number of inputs: expected {expected}, got {actual}")]
    InputSize { expected: usize, actual: usize },
    #[error("Invalid number of targets: expected {expected}, got {actual}")]
    TargetSize { expected: usize, actual: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid network config: {0}")]
    Json(#[from] serde_json::Error),
}
