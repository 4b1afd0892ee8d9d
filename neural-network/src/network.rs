use crate::activations::{Activation, SIGMOID};
use crate::dropout::Dropout;
use crate::error::NetworkError;
use crate::network_config::NetworkConfig;
use matrix::Matrix;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, trace};

/// Range every initial weight is drawn from.
const INITIAL_WEIGHT_RANGE: std::ops::Range<f64> = -0.5..0.5;

/// A three-layer feedforward network (input, one hidden layer, output).
///
/// Both layers use the sigmoid activation and there are no bias terms. The
/// network owns its weights, the activations of the last forward pass and
/// the random source used for initialization and dropout, so it is meant to
/// be driven by a single owner through `&mut self`.
///
/// # Examples
///
/// ```
/// use neural_network::{Network, NetworkConfig};
///
/// let config = NetworkConfig::new(2, 2, 1, 0.5, None).with_seed(7);
/// let mut network = Network::new(&config).unwrap();
///
/// let before = network.feed_forward(&[0.5, 0.8]).unwrap()[0];
/// for _ in 0..500 {
///     network.train(&[0.5, 0.8], &[0.3]).unwrap();
/// }
/// let after = network.feed_forward(&[0.5, 0.8]).unwrap()[0];
///
/// assert!((after - 0.3).abs() < (before - 0.3).abs());
/// ```
#[derive(Debug, Clone)]
pub struct Network {
    config: NetworkConfig,
    /// `input_size x hidden_size`, row `i` holds the weights leaving input `i`
    weights_input_hidden: Matrix,
    /// `hidden_size x output_size`
    weights_hidden_output: Matrix,
    /// Hidden activations of the last forward pass, masked by dropout after `train`
    hidden: Vec<f64>,
    /// Output activations of the last forward pass
    output: Vec<f64>,
    activation: Activation,
    dropout: Option<Dropout>,
    rng: StdRng,
}

impl Network {
    /// Creates a network from `config`, seeding its random source from
    /// `config.seed` or, when absent, from the operating system.
    ///
    /// # Errors
    ///
    /// Returns an error if any layer size is zero, the learning rate is not a
    /// positive finite number or the dropout rate is outside `[0, 1)`.
    pub fn new(config: &NetworkConfig) -> Result<Self, NetworkError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }

    /// Creates a network that draws its initial weights and dropout masks from `rng`.
    ///
    /// `config.seed` is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if any layer size is zero, the learning rate is not a
    /// positive finite number or the dropout rate is outside `[0, 1)`.
    pub fn with_rng(config: &NetworkConfig, mut rng: StdRng) -> Result<Self, NetworkError> {
        config.validate()?;

        let dropout = config.dropout_rate.map(Dropout::new).transpose()?;

        let weights_input_hidden = Matrix::random(
            config.input_size,
            config.hidden_size,
            INITIAL_WEIGHT_RANGE,
            &mut rng,
        );
        let weights_hidden_output = Matrix::random(
            config.hidden_size,
            config.output_size,
            INITIAL_WEIGHT_RANGE,
            &mut rng,
        );

        debug!(
            input_size = config.input_size,
            hidden_size = config.hidden_size,
            output_size = config.output_size,
            learning_rate = config.learning_rate,
            dropout_rate = ?config.dropout_rate,
            "Created neural network"
        );
        trace!(
            input_hidden = %weights_input_hidden,
            hidden_output = %weights_hidden_output,
            "Initial weights"
        );

        Ok(Self {
            config: config.clone(),
            weights_input_hidden,
            weights_hidden_output,
            hidden: vec![0.0; config.hidden_size],
            output: vec![0.0; config.output_size],
            activation: SIGMOID,
            dropout,
            rng,
        })
    }

    /// Performs forward propagation and returns the output activations.
    ///
    /// For every hidden neuron `j`, `hidden[j] = sigmoid(Σ_i inputs[i] * w_ih[i][j])`,
    /// then for every output neuron `k`, `output[k] = sigmoid(Σ_j hidden[j] * w_ho[j][k])`.
    /// Both activation vectors are kept as the network's current state.
    ///
    /// The returned slice borrows the network's output buffer and is
    /// overwritten by the next call to `feed_forward` or `train`.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InputSize`] if `inputs` does not have exactly
    /// `input_size` elements.
    pub fn feed_forward(&mut self, inputs: &[f64]) -> Result<&[f64], NetworkError> {
        self.check_inputs(inputs)?;
        self.propagate(inputs);
        Ok(&self.output)
    }

    /// Runs one stochastic gradient descent step on a single input/target pair.
    ///
    /// The steps run in this order:
    /// 1. forward propagation on `inputs`;
    /// 2. output error `expected[k] - output[k]`;
    /// 3. hidden error `Σ_k output_error[k] * w_ho[i][k]`, using the weights
    ///    before this step's update and without the activation derivative;
    /// 4. dropout on the stored hidden activations;
    /// 5. `w_ho[i][j] += lr * output_error[j] * σ'(output[j]) * hidden[i]`;
    /// 6. `w_ih[i][j] += lr * hidden_error[j] * σ'(hidden[j]) * inputs[i]`.
    ///
    /// Steps 5 and 6 read the masked hidden vector, so a dropped neuron has
    /// `σ'(0) = 0` and neither its outgoing nor its incoming weights move.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InputSize`] or [`NetworkError::TargetSize`] on
    /// a length mismatch. Nothing is modified in that case.
    pub fn train(&mut self, inputs: &[f64], expected: &[f64]) -> Result<(), NetworkError> {
        self.check_inputs(inputs)?;
        if expected.len() != self.config.output_size {
            return Err(NetworkError::TargetSize {
                expected: self.config.output_size,
                actual: expected.len(),
            });
        }

        self.propagate(inputs);

        let output_errors: Vec<f64> = expected
            .iter()
            .zip(&self.output)
            .map(|(target, actual)| target - actual)
            .collect();

        let hidden_errors = self.weights_hidden_output.multiply_vector(&output_errors);

        let dropped = match &self.dropout {
            Some(dropout) => dropout.apply(&mut self.hidden, &mut self.rng),
            None => 0,
        };

        let derivative = self.activation.derivative;
        let output_gradients: Vec<f64> = output_errors
            .iter()
            .zip(&self.output)
            .map(|(error, &output)| error * derivative(output))
            .collect();
        self.weights_hidden_output.add_outer_product(
            self.config.learning_rate,
            &self.hidden,
            &output_gradients,
        );

        let hidden_gradients: Vec<f64> = hidden_errors
            .iter()
            .zip(&self.hidden)
            .map(|(error, &hidden)| error * derivative(hidden))
            .collect();
        self.weights_input_hidden.add_outer_product(
            self.config.learning_rate,
            inputs,
            &hidden_gradients,
        );

        trace!(dropped, ?output_errors, "Completed training step");
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    #[must_use]
    pub fn learning_rate(&self) -> f64 {
        self.config.learning_rate
    }

    /// The effective dropout rate, `0.0` when dropout is disabled.
    #[must_use]
    pub fn dropout_rate(&self) -> f64 {
        self.dropout.map_or(0.0, |dropout| dropout.rate())
    }

    #[must_use]
    pub fn weights_input_hidden(&self) -> &Matrix {
        &self.weights_input_hidden
    }

    #[must_use]
    pub fn weights_hidden_output(&self) -> &Matrix {
        &self.weights_hidden_output
    }

    /// Hidden activations left by the last forward pass or training step.
    #[must_use]
    pub fn hidden(&self) -> &[f64] {
        &self.hidden
    }

    /// Output activations left by the last forward pass or training step.
    #[must_use]
    pub fn output(&self) -> &[f64] {
        &self.output
    }

    fn check_inputs(&self, inputs: &[f64]) -> Result<(), NetworkError> {
        if inputs.len() != self.config.input_size {
            return Err(NetworkError::InputSize {
                expected: self.config.input_size,
                actual: inputs.len(),
            });
        }
        Ok(())
    }

    fn propagate(&mut self, inputs: &[f64]) {
        self.hidden = self.weights_input_hidden.left_multiply(inputs);
        self.activation.apply_in_place(&mut self.hidden);

        self.output = self.weights_hidden_output.left_multiply(&self.hidden);
        self.activation.apply_in_place(&mut self.output);
    }
}
