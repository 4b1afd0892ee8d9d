//! Price estimation facade.
//!
//! [`PriceEstimator`] scales property features and prices into the network's
//! working range, delegates training to a [`Trainer`] and scales predictions
//! back into currency units.

use crate::error::EstimatorError;
use crate::normalize::{FeatureNormalizer, PriceNormalizer};
use crate::property::{
    DEFAULT_FEATURE_MAX, DEFAULT_FEATURE_MIN, DEFAULT_PRICE_MAX, DEFAULT_PRICE_MIN, FEATURE_COUNT,
    Property,
};
use neural_network::{Model, Network, NetworkConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use training::{Dataset, Trainer, TrainingConfig, TrainingHistory};

/// Everything needed to build a [`PriceEstimator`] backed by a [`Network`].
///
/// Every field falls back to its default when missing from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub network: NetworkConfig,
    pub feature_min: Vec<f64>,
    pub feature_max: Vec<f64>,
    pub price_min: f64,
    pub price_max: f64,
    pub training: TrainingConfig,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            feature_min: DEFAULT_FEATURE_MIN.to_vec(),
            feature_max: DEFAULT_FEATURE_MAX.to_vec(),
            price_min: DEFAULT_PRICE_MIN,
            price_max: DEFAULT_PRICE_MAX,
            training: TrainingConfig::default(),
        }
    }
}

impl EstimatorConfig {
    /// Loads an estimator configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, EstimatorError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Estimates property prices with a trained [`Model`].
#[derive(Debug, Clone)]
pub struct PriceEstimator<M = Network> {
    model: M,
    features: FeatureNormalizer,
    prices: PriceNormalizer,
    training: TrainingConfig,
}

impl PriceEstimator<Network> {
    /// Builds a fresh network and normalizers from `config`.
    ///
    /// # Returns
    /// * `Err(EstimatorError::InvalidConfig)` unless the network has
    ///   [`FEATURE_COUNT`] inputs and exactly one output
    /// * `Err(EstimatorError::Model)` if the network config itself is invalid
    pub fn from_config(config: &EstimatorConfig) -> Result<Self, EstimatorError> {
        if config.network.input_size != FEATURE_COUNT {
            return Err(EstimatorError::InvalidConfig(format!(
                "network must have {FEATURE_COUNT} inputs, has {}",
                config.network.input_size
            )));
        }
        if config.network.output_size != 1 {
            return Err(EstimatorError::InvalidConfig(format!(
                "network must have a single output, has {}",
                config.network.output_size
            )));
        }

        let network = Network::new(&config.network)?;
        let features = FeatureNormalizer::new(&config.feature_min, &config.feature_max)?;
        let prices = PriceNormalizer::new(config.price_min, config.price_max)?;
        Ok(Self::new(network, features, prices)?.with_training_config(config.training.clone()))
    }

    /// Estimator with the default 5-8-1 network and default bounds.
    pub fn with_defaults() -> Result<Self, EstimatorError> {
        Self::from_config(&EstimatorConfig::default())
    }
}

impl<M: Model> PriceEstimator<M> {
    /// Wraps an existing model.
    ///
    /// The feature normalizer must cover exactly the [`FEATURE_COUNT`]
    /// features of a [`Property`].
    pub fn new(
        model: M,
        features: FeatureNormalizer,
        prices: PriceNormalizer,
    ) -> Result<Self, EstimatorError> {
        if features.len() != FEATURE_COUNT {
            return Err(EstimatorError::FeatureCount {
                expected: FEATURE_COUNT,
                actual: features.len(),
            });
        }
        Ok(Self {
            model,
            features,
            prices,
            training: TrainingConfig::default(),
        })
    }

    /// Replaces the settings used by [`PriceEstimator::train`] apart from the epoch count.
    #[must_use]
    pub fn with_training_config(mut self, training: TrainingConfig) -> Self {
        self.training = training;
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn training_config(&self) -> &TrainingConfig {
        &self.training
    }

    /// Trains the model on `properties` and their sale `prices` for `epochs` passes.
    ///
    /// Errors are measured on the normalized price scale. NaN or infinite
    /// prices and features are rejected before the model is touched.
    pub fn train(
        &mut self,
        properties: &[Property],
        prices: &[f64],
        epochs: u32,
    ) -> Result<TrainingHistory, EstimatorError> {
        check_pairs(properties, prices)?;

        let inputs = properties
            .iter()
            .map(|property| self.features.normalize(&property.features()))
            .collect::<Result<Vec<_>, _>>()?;
        let targets = prices
            .iter()
            .map(|&price| vec![self.prices.normalize(price)])
            .collect();
        let dataset = Dataset::new(inputs, targets)?;

        let trainer = Trainer::new(TrainingConfig {
            epochs,
            ..self.training.clone()
        });
        Ok(trainer.train(&mut self.model, &dataset)?)
    }

    /// Estimated price of `property` in currency units.
    pub fn estimate_price(&mut self, property: &Property) -> Result<f64, EstimatorError> {
        check_features(property)?;
        let inputs = self.features.normalize(&property.features())?;
        let output = self.model.predict(&inputs)?;
        let normalized = output.first().copied().ok_or(EstimatorError::EmptyPrediction)?;
        let price = self.prices.denormalize(normalized);

        info!(
            square_meters = property.square_meters,
            rooms = property.rooms,
            price,
            "Estimated price"
        );
        Ok(price)
    }

    /// Mean absolute percentage error over `properties`, in percent.
    ///
    /// Each term is `|estimate - price| / price * 100`, so every price must be
    /// positive and finite.
    pub fn evaluate(&mut self, properties: &[Property], prices: &[f64]) -> Result<f64, EstimatorError> {
        check_pairs(properties, prices)?;
        if let Some(&price) = prices.iter().find(|&&price| price <= 0.0) {
            return Err(EstimatorError::InvalidPrice(price));
        }

        let mut total = 0.0;
        for (property, &price) in properties.iter().zip(prices) {
            let estimate = self.estimate_price(property)?;
            let percentage = (estimate - price).abs() / price * 100.0;
            debug!(estimate, price, percentage, "Evaluated property");
            total += percentage;
        }

        let mape = total / properties.len() as f64;
        info!(samples = properties.len(), mape, "Evaluation completed");
        Ok(mape)
    }
}

fn check_pairs(properties: &[Property], prices: &[f64]) -> Result<(), EstimatorError> {
    if properties.len() != prices.len() {
        return Err(EstimatorError::DataMismatch(format!(
            "{} properties but {} prices",
            properties.len(),
            prices.len()
        )));
    }
    if properties.is_empty() {
        return Err(EstimatorError::DataMismatch(
            "at least one property is required".to_string(),
        ));
    }
    if let Some(&price) = prices.iter().find(|price| !price.is_finite()) {
        return Err(EstimatorError::InvalidPrice(price));
    }
    properties.iter().try_for_each(check_features)
}

fn check_features(property: &Property) -> Result<(), EstimatorError> {
    match property
        .features()
        .into_iter()
        .enumerate()
        .find(|(_, value)| !value.is_finite())
    {
        Some((index, value)) => Err(EstimatorError::NonFiniteFeature { index, value }),
        None => Ok(()),
    }
}
