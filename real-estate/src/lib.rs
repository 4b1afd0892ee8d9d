//! Real-estate price estimation on top of a three-layer neural network.
//!
//! Property features and prices are min-max scaled into the network's
//! working range before training and prediction, and predictions are scaled
//! back into currency units.
pub mod error;
pub mod estimator;
pub mod normalize;
pub mod property;

pub use crate::error::EstimatorError;
pub use crate::estimator::{EstimatorConfig, PriceEstimator};
pub use crate::normalize::{Bounds, FeatureNormalizer, PriceNormalizer};
pub use crate::property::{FEATURE_COUNT, Property, PropertyDataset};
