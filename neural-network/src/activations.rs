/// Sigmoid activation: `1 / (1 + e^(-x))`, maps any real into (0, 1).
#[inline]
#[must_use]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Derivative of the sigmoid expressed in terms of its output.
///
/// `y` must already be a sigmoid output; the function does not re-apply the
/// sigmoid, it returns `y * (1 - y)`.
#[inline]
#[must_use]
pub fn sigmoid_derivative(y: f64) -> f64 {
    y * (1.0 - y)
}

/// An activation function paired with its derivative.
///
/// The derivative takes the activated value, not the pre-activation sum.
#[derive(Clone, Copy, Debug)]
pub struct Activation {
    pub function: fn(f64) -> f64,
    pub derivative: fn(f64) -> f64,
}

impl Activation {
    /// Applies the activation to every element of `values` in place.
    pub fn apply_in_place(&self, values: &mut [f64]) {
        for value in values.iter_mut() {
            *value = (self.function)(*value);
        }
    }
}

pub const SIGMOID: Activation = Activation {
    function: sigmoid,
    derivative: sigmoid_derivative,
};
