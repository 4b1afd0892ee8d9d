use crate::error::NetworkError;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for a three-layer network.
///
/// Holds the topology (input, hidden and output sizes) and the training
/// hyperparameters. The topology is fixed for the lifetime of a network
/// built from it.
///
/// # Example
///
/// ```
/// use neural_network::NetworkConfigBuilder;
///
/// let config = NetworkConfigBuilder::default()
///     .input_size(2)
///     .hidden_size(3)
///     .output_size(1)
///     .learning_rate(0.5)
///     .dropout_rate(0.0)
///     .seed(42)
///     .build()
///     .unwrap();
/// assert_eq!(config.hidden_size, 3);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Builder)]
#[builder(default)]
pub struct NetworkConfig {
    /// Number of input neurons.
    pub input_size: usize,

    /// Number of neurons in the single hidden layer.
    pub hidden_size: usize,

    /// Number of output neurons.
    pub output_size: usize,

    /// Learning rate for gradient descent.
    /// Scales every weight update.
    pub learning_rate: f64,

    /// Probability of zeroing each hidden neuron during a training step.
    /// `None` disables dropout entirely.
    #[serde(default)]
    #[builder(setter(strip_option))]
    pub dropout_rate: Option<f64>,

    /// Seed for weight initialization and dropout masks.
    /// `None` seeds from the operating system.
    #[serde(default)]
    #[builder(setter(strip_option))]
    pub seed: Option<u64>,
}

impl NetworkConfig {
    pub fn new(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        learning_rate: f64,
        dropout_rate: Option<f64>,
    ) -> Self {
        Self {
            input_size,
            hidden_size,
            output_size,
            learning_rate,
            dropout_rate,
            seed: None,
        }
    }

    /// Returns a copy of this configuration with a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Loads a network configuration from a JSON file.
    ///
    /// Missing `dropout_rate` and `seed` fields default to `None`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use neural_network::NetworkConfig;
    /// use std::path::Path;
    ///
    /// let config = NetworkConfig::load(Path::new("network.json")).unwrap();
    /// ```
    pub fn load(path: &Path) -> Result<Self, NetworkError> {
        let config_str = fs::read_to_string(path)?;
        let config: NetworkConfig = serde_json::from_str(&config_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the sizes and rates a network needs before it can be built.
    pub fn validate(&self) -> Result<(), NetworkError> {
        for (layer, size) in [
            ("input", self.input_size),
            ("hidden", self.hidden_size),
            ("output", self.output_size),
        ] {
            if size == 0 {
                return Err(NetworkError::InvalidLayerSize { layer });
            }
        }

        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NetworkError::InvalidLearningRate(self.learning_rate));
        }

        if let Some(rate) = self.dropout_rate {
            if !(0.0..1.0).contains(&rate) {
                return Err(NetworkError::InvalidDropoutRate(rate));
            }
        }

        Ok(())
    }
}

/// Five property features, eight hidden neurons and one price output,
/// trained with a learning rate of 0.05 and 10% dropout.
impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            input_size: 5,
            hidden_size: 8,
            output_size: 1,
            learning_rate: 0.05,
            dropout_rate: Some(0.1),
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_config() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let config_path = dir.path().join("network.json");

        let config_json = r#"{
            "input_size": 3,
            "hidden_size": 6,
            "output_size": 2,
            "learning_rate": 0.2,
            "dropout_rate": 0.25,
            "seed": 11
        }"#;

        let mut file = File::create(&config_path)?;
        file.write_all(config_json.as_bytes())?;

        let config = NetworkConfig::load(&config_path)?;
        assert_eq!(config.input_size, 3);
        assert_eq!(config.hidden_size, 6);
        assert_eq!(config.output_size, 2);
        assert_eq!(config.learning_rate, 0.2);
        assert_eq!(config.dropout_rate, Some(0.25));
        assert_eq!(config.seed, Some(11));
        Ok(())
    }

    #[test]
    fn test_load_config_without_optional_fields() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let config_path = dir.path().join("network.json");
        std::fs::write(
            &config_path,
            r#"{"input_size": 2, "hidden_size": 2, "output_size": 1, "learning_rate": 0.5}"#,
        )?;

        let config = NetworkConfig::load(&config_path)?;
        assert_eq!(config.dropout_rate, None);
        assert_eq!(config.seed, None);
        Ok(())
    }

    #[test]
    fn test_load_rejects_invalid_values() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let config_path = dir.path().join("network.json");
        std::fs::write(
            &config_path,
            r#"{"input_size": 0, "hidden_size": 2, "output_size": 1, "learning_rate": 0.5}"#,
        )?;

        let result = NetworkConfig::load(&config_path);
        assert!(matches!(
            result,
            Err(NetworkError::InvalidLayerSize { layer: "input" })
        ));
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let result = NetworkConfig::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(NetworkError::Io(_))));
    }

    #[test]
    fn test_default_config() {
        let config = NetworkConfig::default();
        assert_eq!(config.input_size, 5);
        assert_eq!(config.hidden_size, 8);
        assert_eq!(config.output_size, 1);
        assert_eq!(config.learning_rate, 0.05);
        assert_eq!(config.dropout_rate, Some(0.1));
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_falls_back_to_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let config = NetworkConfigBuilder::default().hidden_size(16).build()?;
        assert_eq!(config.hidden_size, 16);
        assert_eq!(config.input_size, 5);
        assert_eq!(config.dropout_rate, Some(0.1));
        Ok(())
    }

    #[test]
    fn test_validate() {
        let valid = NetworkConfig::new(2, 2, 1, 0.5, None);
        assert!(valid.validate().is_ok());

        let no_hidden = NetworkConfig::new(2, 0, 1, 0.5, None);
        assert!(matches!(
            no_hidden.validate(),
            Err(NetworkError::InvalidLayerSize { layer: "hidden" })
        ));

        for rate in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let config = NetworkConfig::new(2, 2, 1, rate, None);
            assert!(matches!(
                config.validate(),
                Err(NetworkError::InvalidLearningRate(_))
            ));
        }

        for rate in [-0.01, 1.0] {
            let config = NetworkConfig::new(2, 2, 1, 0.5, Some(rate));
            assert!(matches!(
                config.validate(),
                Err(NetworkError::InvalidDropoutRate(_))
            ));
        }
    }
}
