//! Training loop for any [`Model`].
//!
//! This module provides:
//! - Epoch iteration over a [`Dataset`], optionally shuffled
//! - Periodic error measurement recorded in a [`TrainingHistory`]
//! - Progress visualization using a progress bar

use crate::dataset::{Dataset, TrainingError, mean_absolute_error};
use crate::training_config::TrainingConfig;
use crate::training_history::TrainingHistory;
use indicatif::{ProgressBar, ProgressStyle};
use neural_network::Model;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::info;

/// Trainer runs stochastic training passes over a dataset.
///
/// The trainer does not own the model, so the same model can be trained in
/// several rounds and queried in between.
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    config: TrainingConfig,
}

impl Trainer {
    /// Creates a new trainer with the specified configuration.
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Trains `model` on `dataset` for the configured number of epochs.
    ///
    /// Each epoch calls [`Model::train`] once per sample. The mean absolute
    /// error is measured before training, after the first epoch, every
    /// `log_interval` epochs and after the last epoch.
    ///
    /// # Returns
    /// * `Ok(TrainingHistory)` with every measured error
    /// * `Err(TrainingError)` if the config is unusable or the model rejects a sample
    pub fn train<M: Model>(
        &self,
        model: &mut M,
        dataset: &Dataset,
    ) -> Result<TrainingHistory, TrainingError> {
        if self.config.log_interval == 0 {
            return Err(TrainingError::InvalidConfig(
                "log_interval must be at least 1".to_string(),
            ));
        }

        let epochs = self.config.epochs;
        info!(samples = dataset.len(), epochs, "Starting training");

        let initial_error = mean_absolute_error(model, dataset)?;
        info!(error = initial_error, "Error before training");
        let mut history = TrainingHistory::new(initial_error);

        let progress = if self.config.show_progress {
            let bar = ProgressBar::new(u64::from(epochs));
            bar.set_style(create_progress_style(
                "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} Epoch {msg}",
            ));
            bar
        } else {
            ProgressBar::hidden()
        };

        let mut indices: Vec<usize> = (0..dataset.len()).collect();
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        for epoch in 1..=epochs {
            if self.config.shuffle {
                indices.shuffle(&mut rng);
            }

            for &index in &indices {
                if let Some((input, target)) = dataset.get(index) {
                    model.train(input, target)?;
                }
            }

            if epoch == 1 || epoch % self.config.log_interval == 0 || epoch == epochs {
                let error = mean_absolute_error(model, dataset)?;
                history.record_checkpoint(epoch, error);
                info!(epoch, error, "Training checkpoint");
                progress.set_message(format!("- Error: {:.6}", error));
            }
            progress.inc(1);
        }

        progress.finish_with_message(format!("- Final error: {:.6}", history.final_error()));
        info!(
            error = history.final_error(),
            best_error = history.best_error,
            best_epoch = history.best_epoch,
            "Training completed"
        );

        Ok(history)
    }
}

/// Creates a progress bar style with the specified template.
fn create_progress_style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use neural_network::{Network, NetworkConfig, NetworkError};

    fn quiet_config(epochs: u32, log_interval: u32) -> TrainingConfig {
        TrainingConfig {
            epochs,
            log_interval,
            shuffle: false,
            seed: Some(1),
            show_progress: false,
        }
    }

    /// Model that counts how often it was trained
    #[derive(Default)]
    struct Counting {
        steps: usize,
        seen: Vec<f64>,
    }

    impl Model for Counting {
        fn train(&mut self, input: &[f64], _expected: &[f64]) -> Result<(), NetworkError> {
            self.steps += 1;
            self.seen.extend_from_slice(input);
            Ok(())
        }

        fn predict(&mut self, _input: &[f64]) -> Result<Vec<f64>, NetworkError> {
            Ok(vec![0.0])
        }
    }

    fn small_dataset() -> Result<Dataset, TrainingError> {
        Dataset::new(
            vec![vec![0.1, 0.9], vec![0.5, 0.5], vec![0.9, 0.1]],
            vec![vec![0.2], vec![0.5], vec![0.8]],
        )
    }

    #[test]
    fn test_trains_every_sample_every_epoch_in_order() -> Result<(), TrainingError> {
        let dataset = small_dataset()?;
        let mut model = Counting::default();

        Trainer::new(quiet_config(4, 2)).train(&mut model, &dataset)?;

        assert_eq!(model.steps, 12);
        assert_eq!(model.seen.get(..6), Some(&[0.1, 0.9, 0.5, 0.5, 0.9, 0.1][..]));
        Ok(())
    }

    #[test]
    fn test_checkpoint_epochs() -> Result<(), TrainingError> {
        let dataset = small_dataset()?;
        let mut model = Counting::default();

        let history = Trainer::new(quiet_config(2500, 1000)).train(&mut model, &dataset)?;

        let epochs: Vec<u32> = history.checkpoints.iter().map(|&(epoch, _)| epoch).collect();
        assert_eq!(epochs, vec![1, 1000, 2000, 2500]);
        Ok(())
    }

    #[test]
    fn test_zero_epochs_only_measures_initial_error() -> Result<(), TrainingError> {
        let dataset = small_dataset()?;
        let mut model = Counting::default();

        let history = Trainer::new(quiet_config(0, 10)).train(&mut model, &dataset)?;

        assert_eq!(model.steps, 0);
        assert!(history.checkpoints.is_empty());
        assert_eq!(history.final_error(), history.initial_error);
        Ok(())
    }

    #[test]
    fn test_rejects_zero_log_interval() -> Result<(), TrainingError> {
        let dataset = small_dataset()?;
        let mut model = Counting::default();

        let result = Trainer::new(quiet_config(10, 0)).train(&mut model, &dataset);
        assert!(matches!(result, Err(TrainingError::InvalidConfig(_))));
        Ok(())
    }

    #[test]
    fn test_shuffle_visits_every_sample() -> Result<(), TrainingError> {
        let dataset = small_dataset()?;
        let mut model = Counting::default();
        let config = TrainingConfig {
            shuffle: true,
            ..quiet_config(5, 5)
        };

        Trainer::new(config).train(&mut model, &dataset)?;

        assert_eq!(model.steps, 15);
        let firsts: Vec<f64> = model.seen.chunks(2).filter_map(|pair| pair.first().copied()).collect();
        for value in [0.1, 0.5, 0.9] {
            assert_eq!(firsts.iter().filter(|&&v| v == value).count(), 5);
        }
        Ok(())
    }

    #[test]
    fn test_network_error_decreases() -> Result<(), TrainingError> {
        let dataset = small_dataset()?;
        let config = NetworkConfig::new(2, 4, 1, 0.5, None).with_seed(12);
        let mut network = Network::new(&config)?;

        let history = Trainer::new(quiet_config(2000, 500)).train(&mut network, &dataset)?;

        assert!(history.final_error() < history.initial_error);
        assert!(history.best_error <= history.final_error());
        Ok(())
    }

    #[test]
    fn test_model_errors_are_propagated() -> Result<(), TrainingError> {
        let dataset = small_dataset()?;
        let config = NetworkConfig::new(3, 4, 1, 0.5, None).with_seed(12);
        let mut network = Network::new(&config)?;

        let result = Trainer::new(quiet_config(1, 1)).train(&mut network, &dataset);
        assert!(matches!(
            result,
            Err(TrainingError::Model(NetworkError::InputSize { .. }))
        ));
        Ok(())
    }
}
