//! Paired input/target samples and the error metric reported while training.

use neural_network::{Model, NetworkError};
use thiserror::Error;

/// Errors that can occur while preparing data or running the training loop
#[derive(Debug, Error)]
pub enum TrainingError {
    /// Error for mismatches between inputs and targets
    #[error("Data mismatch: {0}")]
    DataMismatch(String),
    /// Error raised by the model for a single sample
    #[error("Model error: {0}")]
    Model(#[from] NetworkError),
    /// Error for an epoch count the trainer cannot run
    #[error("Invalid training config: {0}")]
    InvalidConfig(String),
}

/// Container for already-normalized training samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    inputs: Vec<Vec<f64>>,
    targets: Vec<Vec<f64>>,
}

impl Dataset {
    /// Creates a new dataset from input and target vectors.
    ///
    /// # Returns
    /// * `Ok(Dataset)` if there are as many targets as inputs, at least one
    ///   sample, and every input (and every target) has the same width
    /// * `Err(TrainingError::DataMismatch)` otherwise
    ///
    /// # Example
    /// ```
    /// use training::Dataset;
    ///
    /// let dataset = Dataset::new(vec![vec![0.5, 0.8]], vec![vec![0.3]]).unwrap();
    /// assert_eq!(dataset.len(), 1);
    /// ```
    pub fn new(inputs: Vec<Vec<f64>>, targets: Vec<Vec<f64>>) -> Result<Self, TrainingError> {
        if inputs.len() != targets.len() {
            return Err(TrainingError::DataMismatch(format!(
                "Number of inputs ({}) does not match number of targets ({})",
                inputs.len(),
                targets.len()
            )));
        }
        if inputs.is_empty() {
            return Err(TrainingError::DataMismatch(
                "Dataset must contain at least one sample".to_string(),
            ));
        }
        check_width("input", &inputs)?;
        check_width("target", &targets)?;

        Ok(Self { inputs, targets })
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn inputs(&self) -> &[Vec<f64>] {
        &self.inputs
    }

    pub fn targets(&self) -> &[Vec<f64>] {
        &self.targets
    }

    /// Iterates over `(input, target)` pairs in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = (&[f64], &[f64])> {
        self.inputs
            .iter()
            .zip(&self.targets)
            .map(|(input, target)| (input.as_slice(), target.as_slice()))
    }

    /// Returns the sample at `index`, if any.
    pub fn get(&self, index: usize) -> Option<(&[f64], &[f64])> {
        Some((
            self.inputs.get(index)?.as_slice(),
            self.targets.get(index)?.as_slice(),
        ))
    }
}

fn check_width(kind: &str, rows: &[Vec<f64>]) -> Result<(), TrainingError> {
    let width = rows.first().map_or(0, Vec::len);
    if width == 0 {
        return Err(TrainingError::DataMismatch(format!("Empty {kind} vector")));
    }
    if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
        return Err(TrainingError::DataMismatch(format!(
            "{kind} {index} has {} values, expected {width}",
            row.len()
        )));
    }
    Ok(())
}

/// Mean absolute error of `model` over `dataset`.
///
/// Sums `|expected - predicted|` over every output component of every sample
/// and divides by the number of samples. A prediction whose width differs
/// from its target is a [`TrainingError::DataMismatch`].
pub fn mean_absolute_error<M: Model>(model: &mut M, dataset: &Dataset) -> Result<f64, TrainingError> {
    let mut error_sum = 0.0;
    for (index, (input, target)) in dataset.iter().enumerate() {
        let output = model.predict(input)?;
        if output.len() != target.len() {
            return Err(TrainingError::DataMismatch(format!(
                "target {index} has {} values but the model predicted {}",
                target.len(),
                output.len()
            )));
        }
        error_sum += target
            .iter()
            .zip(&output)
            .map(|(expected, actual)| (expected - actual).abs())
            .sum::<f64>();
    }
    Ok(error_sum / dataset.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use neural_network::{Network, NetworkConfig};

    /// Model that always predicts the same output
    struct Constant(Vec<f64>);

    impl Model for Constant {
        fn train(&mut self, _input: &[f64], _expected: &[f64]) -> Result<(), NetworkError> {
            Ok(())
        }

        fn predict(&mut self, _input: &[f64]) -> Result<Vec<f64>, NetworkError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_dataset_rejects_count_mismatch() {
        let result = Dataset::new(vec![vec![0.0], vec![1.0]], vec![vec![0.0]]);
        assert!(matches!(result, Err(TrainingError::DataMismatch(_))));
    }

    #[test]
    fn test_dataset_rejects_empty() {
        let result = Dataset::new(vec![], vec![]);
        assert!(matches!(result, Err(TrainingError::DataMismatch(_))));
    }

    #[test]
    fn test_dataset_rejects_ragged_inputs() {
        let result = Dataset::new(vec![vec![0.0, 1.0], vec![1.0]], vec![vec![0.0], vec![1.0]]);
        let Err(TrainingError::DataMismatch(message)) = result else {
            panic!("expected a data mismatch");
        };
        assert!(message.contains("input 1"));
    }

    #[test]
    fn test_dataset_access() -> Result<(), TrainingError> {
        let dataset = Dataset::new(
            vec![vec![0.1, 0.2], vec![0.3, 0.4]],
            vec![vec![1.0], vec![0.0]],
        )?;

        assert_eq!(dataset.len(), 2);
        assert!(!dataset.is_empty());
        assert_eq!(dataset.get(1), Some((&[0.3, 0.4][..], &[0.0][..])));
        assert_eq!(dataset.get(2), None);
        assert_eq!(dataset.iter().count(), 2);
        Ok(())
    }

    #[test]
    fn test_mean_absolute_error() -> Result<(), TrainingError> {
        let dataset = Dataset::new(
            vec![vec![0.0], vec![0.0]],
            vec![vec![0.2, 0.9], vec![0.6, 0.5]],
        )?;
        let mut model = Constant(vec![0.5, 0.5]);

        // (0.3 + 0.4 + 0.1 + 0.0) / 2
        let error = mean_absolute_error(&mut model, &dataset)?;
        assert_relative_eq!(error, 0.4, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_mean_absolute_error_rejects_output_width_mismatch() -> Result<(), TrainingError> {
        let dataset = Dataset::new(vec![vec![0.5, 0.8]], vec![vec![0.3, 0.9]])?;

        let mut narrow = Constant(vec![0.5]);
        assert!(matches!(
            mean_absolute_error(&mut narrow, &dataset),
            Err(TrainingError::DataMismatch(_))
        ));

        let mut wide = Constant(vec![0.5, 0.5, 0.5]);
        assert!(matches!(
            mean_absolute_error(&mut wide, &dataset),
            Err(TrainingError::DataMismatch(_))
        ));
        Ok(())
    }

    #[test]
    fn test_mean_absolute_error_with_network_of_fewer_outputs() -> Result<(), TrainingError> {
        let dataset = Dataset::new(vec![vec![0.5, 0.8]], vec![vec![0.3, 0.9]])?;
        let config = NetworkConfig::new(2, 2, 1, 0.5, None).with_seed(5);
        let mut network = Network::new(&config)?;

        let result = mean_absolute_error(&mut network, &dataset);
        let Err(TrainingError::DataMismatch(message)) = result else {
            panic!("expected a data mismatch");
        };
        assert!(message.contains("target 0"));
        Ok(())
    }
}
