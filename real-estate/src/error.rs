use neural_network::NetworkError;
use thiserror::Error;
use training::TrainingError;

/// Errors that can occur while configuring, training or querying a price estimator
#[derive(Debug, Error)]
pub enum EstimatorError {
    /// Minimum and maximum vectors of different lengths
    #[error("Bounds mismatch: {min} minimums but {max} maximums")]
    BoundsLength { min: usize, max: usize },
    /// A range whose minimum is not strictly below its maximum
    #[error("Invalid bounds for {name}: min {min} must be below max {max}")]
    InvalidBounds { name: String, min: f64, max: f64 },
    /// A feature vector whose length does not match the normalizer
    #[error("Expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },
    /// Mismatches between properties and prices
    #[error("Data mismatch: {0}")]
    DataMismatch(String),
    /// A price that is NaN or infinite, or not positive where a percentage error needs it
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),
    /// A property feature that is NaN or infinite
    #[error("Feature {index} is not a finite number: {value}")]
    NonFiniteFeature { index: usize, value: f64 },
    /// A model that returned no output value
    #[error("Model returned an empty prediction")]
    EmptyPrediction,
    /// Network and normalizers that do not fit together
    #[error("Invalid estimator config: {0}")]
    InvalidConfig(String),
    #[error("Model error: {0}")]
    Model(#[from] NetworkError),
    #[error("Training error: {0}")]
    Training(#[from] TrainingError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
