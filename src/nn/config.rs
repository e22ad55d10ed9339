//! Network configuration.

use crate::error::{Error, Result};

/// Configuration for a [`Backpropagation`](super::Backpropagation) network.
///
/// # Builder Pattern
///
/// ```
/// use u_cogai::nn::NetworkConfig;
///
/// let config = NetworkConfig::new(vec![2, 2, 1])
///     .with_learning_rate(0.5)
///     .with_momentum(0.1)
///     .with_bias(true)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    /// Layer widths, input first and output last. At least two entries.
    pub layers: Vec<usize>,

    /// Step size applied to each weight change. Must be positive.
    pub learning_rate: f64,

    /// Fraction of the previous weight change added to the current one.
    pub momentum: f64,

    /// Whether every non-output layer carries a constant `1.0` bias unit.
    pub has_bias: bool,

    /// Seed for weight initialization. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl NetworkConfig {
    /// Creates a configuration with default learning rate (0.25), momentum
    /// (0.1) and bias enabled.
    pub fn new(layers: Vec<usize>) -> Self {
        Self {
            layers,
            learning_rate: 0.25,
            momentum: 0.1,
            has_bias: true,
            seed: None,
        }
    }

    /// Sets the learning rate.
    pub fn with_learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = rate;
        self
    }

    /// Sets the momentum.
    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.momentum = momentum;
        self
    }

    /// Enables or disables bias units.
    pub fn with_bias(mut self, has_bias: bool) -> Self {
        self.has_bias = has_bias;
        self
    }

    /// Sets the weight-initialization seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        validate_hyperparameters(&self.layers, self.learning_rate, self.momentum)
    }
}

pub(crate) fn validate_hyperparameters(
    layers: &[usize],
    learning_rate: f64,
    momentum: f64,
) -> Result<()> {
    if layers.len() < 2 {
        return Err(Error::config("layers must contain at least 2 entries"));
    }
    if let Some(i) = layers.iter().position(|&w| w == 0) {
        return Err(Error::config(format!("layer {i} has zero width")));
    }
    if !(learning_rate.is_finite() && learning_rate > 0.0) {
        return Err(Error::config("learning_rate must be positive and finite"));
    }
    if !(momentum.is_finite() && momentum >= 0.0) {
        return Err(Error::config("momentum must be non-negative and finite"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NetworkConfig::new(vec![3, 4, 2]);
        assert_eq!(config.layers, vec![3, 4, 2]);
        assert!((config.learning_rate - 0.25).abs() < 1e-12);
        assert!((config.momentum - 0.1).abs() < 1e-12);
        assert!(config.has_bias);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_too_few_layers() {
        assert!(matches!(
            NetworkConfig::new(vec![3]).validate(),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_zero_width_layer() {
        assert!(NetworkConfig::new(vec![2, 0, 1]).validate().is_err());
    }

    #[test]
    fn test_bad_learning_rate() {
        let base = NetworkConfig::new(vec![2, 1]);
        assert!(base.clone().with_learning_rate(0.0).validate().is_err());
        assert!(base.clone().with_learning_rate(-0.1).validate().is_err());
        assert!(base.with_learning_rate(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_momentum_bounds() {
        let base = NetworkConfig::new(vec![2, 1]);
        assert!(base.clone().with_momentum(0.0).validate().is_ok());
        assert!(base.with_momentum(-0.5).validate().is_err());
    }
}
