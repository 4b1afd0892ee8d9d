//! Min-max scaling of property features and prices.
//!
//! Values inside the recorded bounds map into `[0, 1]`; values outside them
//! are not clamped and map proportionally outside that range.

use crate::error::EstimatorError;
use serde::{Deserialize, Serialize};

/// A closed `[min, max]` range with `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    min: f64,
    max: f64,
}

impl Bounds {
    /// Creates a range, rejecting empty, inverted or non-finite bounds.
    ///
    /// `name` only appears in the error message.
    pub fn new(name: &str, min: f64, max: f64) -> Result<Self, EstimatorError> {
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(EstimatorError::InvalidBounds {
                name: name.to_string(),
                min,
                max,
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// `(value - min) / (max - min)`
    #[inline]
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }

    /// `normalized * (max - min) + min`
    #[inline]
    pub fn denormalize(&self, normalized: f64) -> f64 {
        normalized * (self.max - self.min) + self.min
    }
}

/// Per-feature min-max normalizer.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureNormalizer {
    bounds: Vec<Bounds>,
}

impl FeatureNormalizer {
    /// Builds a normalizer from matching minimum and maximum vectors.
    pub fn new(min: &[f64], max: &[f64]) -> Result<Self, EstimatorError> {
        if min.len() != max.len() {
            return Err(EstimatorError::BoundsLength {
                min: min.len(),
                max: max.len(),
            });
        }
        let bounds = min
            .iter()
            .zip(max)
            .enumerate()
            .map(|(index, (&lo, &hi))| Bounds::new(&format!("feature {index}"), lo, hi))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { bounds })
    }

    /// Number of features this normalizer expects.
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    pub fn bounds(&self) -> &[Bounds] {
        &self.bounds
    }

    pub fn normalize(&self, features: &[f64]) -> Result<Vec<f64>, EstimatorError> {
        self.check_len(features)?;
        Ok(features
            .iter()
            .zip(&self.bounds)
            .map(|(&value, bounds)| bounds.normalize(value))
            .collect())
    }

    pub fn denormalize(&self, normalized: &[f64]) -> Result<Vec<f64>, EstimatorError> {
        self.check_len(normalized)?;
        Ok(normalized
            .iter()
            .zip(&self.bounds)
            .map(|(&value, bounds)| bounds.denormalize(value))
            .collect())
    }

    fn check_len(&self, values: &[f64]) -> Result<(), EstimatorError> {
        if values.len() != self.bounds.len() {
            return Err(EstimatorError::FeatureCount {
                expected: self.bounds.len(),
                actual: values.len(),
            });
        }
        Ok(())
    }
}

/// Min-max normalizer for a single price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceNormalizer {
    bounds: Bounds,
}

impl PriceNormalizer {
    pub fn new(min: f64, max: f64) -> Result<Self, EstimatorError> {
        Ok(Self {
            bounds: Bounds::new("price", min, max)?,
        })
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn normalize(&self, price: f64) -> f64 {
        self.bounds.normalize(price)
    }

    pub fn denormalize(&self, normalized: f64) -> f64 {
        self.bounds.denormalize(normalized)
    }
}
