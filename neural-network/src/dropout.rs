//! Dropout for the hidden layer.
//!
//! Each neuron is zeroed independently with probability `rate`. Surviving
//! activations are left as they are: there is no `1 / (1 - rate)` rescaling.
use crate::error::NetworkError;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dropout {
    rate: f64,
}

impl Dropout {
    /// Creates a dropout mask generator with the given rate, which must lie in `[0, 1)`.
    pub fn new(rate: f64) -> Result<Self, NetworkError> {
        if !(0.0..1.0).contains(&rate) {
            return Err(NetworkError::InvalidDropoutRate(rate));
        }
        Ok(Self { rate })
    }

    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Zeroes each element of `layer` whose uniform draw falls below the rate.
    ///
    /// Returns the number of neurons dropped. A zero rate leaves the layer
    /// untouched and draws nothing from `rng`.
    pub fn apply<R: Rng>(&self, layer: &mut [f64], rng: &mut R) -> usize {
        if self.rate == 0.0 {
            return 0;
        }

        let mut dropped = 0;
        for value in layer.iter_mut() {
            if rng.random::<f64>() < self.rate {
                *value = 0.0;
                dropped += 1;
            }
        }
        dropped
    }
}
