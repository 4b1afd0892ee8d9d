//! The train/predict contract consumed by orchestration code.
use crate::error::NetworkError;
use crate::network::Network;

/// A model that can be trained one sample at a time and queried for predictions.
///
/// [`Network`] is the only implementation in this workspace; the trait lets
/// the trainer and the price estimator stay independent of it.
pub trait Model {
    /// Runs one training step on a single input/target pair.
    fn train(&mut self, input: &[f64], expected: &[f64]) -> Result<(), NetworkError>;

    /// Returns a copy of the model's output for `input`.
    fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>, NetworkError>;
}

impl Model for Network {
    fn train(&mut self, input: &[f64], expected: &[f64]) -> Result<(), NetworkError> {
        Network::train(self, input, expected)
    }

    fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>, NetworkError> {
        self.feed_forward(input).map(<[f64]>::to_vec)
    }
}
