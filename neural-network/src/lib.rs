// Modules
pub mod activations;
pub mod dropout;
pub mod error;
pub mod model;
pub mod network;
pub mod network_config;

pub use activations::{Activation, SIGMOID, sigmoid, sigmoid_derivative};
pub use dropout::Dropout;
pub use error::NetworkError;
pub use matrix::Matrix;
pub use model::Model;
pub use network::Network;
pub use network_config::{NetworkConfig, NetworkConfigBuilder};
