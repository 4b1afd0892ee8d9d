use crate::error::EstimatorError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Number of features a [`Property`] contributes to the network input.
pub const FEATURE_COUNT: usize = 5;

/// Lowest expected value of each feature, in [`Property::features`] order.
pub const DEFAULT_FEATURE_MIN: [f64; FEATURE_COUNT] = [30.0, 1.0, 1.0, 0.0, 1.0];

/// Highest expected value of each feature, in [`Property::features`] order.
pub const DEFAULT_FEATURE_MAX: [f64; FEATURE_COUNT] = [250.0, 5.0, 3.0, 10.0, 10.0];

pub const DEFAULT_PRICE_MIN: f64 = 50_000.0;
pub const DEFAULT_PRICE_MAX: f64 = 900_000.0;

/// A property to be appraised.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub square_meters: f64,
    pub rooms: u32,
    pub bathrooms: u32,
    /// Floor number, 0 for the ground floor
    pub floor: i32,
    /// Neighbourhood quality from 1 to 10
    pub zone_rating: u8,
}

impl Property {
    pub fn new(square_meters: f64, rooms: u32, bathrooms: u32, floor: i32, zone_rating: u8) -> Self {
        Self {
            square_meters,
            rooms,
            bathrooms,
            floor,
            zone_rating,
        }
    }

    /// Raw feature vector: area, rooms, bathrooms, floor, zone rating.
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [
            self.square_meters,
            f64::from(self.rooms),
            f64::from(self.bathrooms),
            f64::from(self.floor),
            f64::from(self.zone_rating),
        ]
    }
}

/// Properties paired with their sale prices, as stored in a JSON data file.
///
/// ```json
/// {"properties": [{"square_meters": 80.0, "rooms": 3, "bathrooms": 1, "floor": 2, "zone_rating": 7}],
///  "prices": [220000.0]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDataset {
    pub properties: Vec<Property>,
    pub prices: Vec<f64>,
}

impl PropertyDataset {
    /// Loads a dataset from a JSON file and checks that every property has a price.
    pub fn load(path: &Path) -> Result<Self, EstimatorError> {
        let contents = fs::read_to_string(path)?;
        let dataset: PropertyDataset = serde_json::from_str(&contents)?;
        if dataset.properties.len() != dataset.prices.len() {
            return Err(EstimatorError::DataMismatch(format!(
                "{} properties but {} prices",
                dataset.properties.len(),
                dataset.prices.len()
            )));
        }
        Ok(dataset)
    }
}
