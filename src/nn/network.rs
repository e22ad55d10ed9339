//! Layered feed-forward network trained by online backpropagation.
//!
//! # Layout
//!
//! For `layers = [3, 4, 2]` with bias enabled:
//!
//! ```text
//! neurons = [ [x0, x1, x2, 1.0], [h0, h1, h2, h3, 1.0], [y0, y1] ]
//! weights = [ 4×4 matrix, 5×2 matrix ]   // [from-unit][to-unit]
//! ```
//!
//! The bias unit is the last entry of every non-output layer and is never
//! overwritten by the forward pass.
//!
//! # References
//!
//! - Rumelhart, Hinton & Williams (1986), "Learning representations by
//!   back-propagating errors"

use super::activation::{initial_weight, sigmoid, sigmoid_derivative};
use super::config::{validate_hyperparameters, NetworkConfig};
use super::snapshot::NetworkSnapshot;
use crate::error::{Error, Result};
use crate::random::rng_from_seed;
use rand::Rng;

/// Multi-layer perceptron with sigmoid units, momentum and optional bias.
///
/// # Usage
///
/// ```
/// use u_cogai::nn::{Backpropagation, NetworkConfig};
///
/// let config = NetworkConfig::new(vec![3, 4, 2]).with_seed(7);
/// let mut net = Backpropagation::new(&config).unwrap();
///
/// let error = net.train(&[0.1, 0.5, 0.9], &[1.0, 0.0]).unwrap();
/// assert!(error >= 0.0);
///
/// let outputs = net.eval(&[0.1, 0.5, 0.9]).unwrap();
/// assert_eq!(outputs.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Backpropagation {
    layers: Vec<usize>,
    learning_rate: f64,
    momentum: f64,
    has_bias: bool,
    neurons: Vec<Vec<f64>>,
    weights: Vec<Vec<Vec<f64>>>,
    previous_weight_changes: Vec<Vec<Vec<f64>>>,
    /// Per-layer error terms from the last `train` call; index 0 is unused.
    deltas: Vec<Vec<f64>>,
}

impl Backpropagation {
    /// Builds a network with weights drawn from the config's seed.
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        let mut rng = rng_from_seed(config.seed);
        Self::with_rng(config, &mut rng)
    }

    /// Builds a network drawing initial weights from `rng`.
    ///
    /// All activations start at `1.0`, weights are uniform in `[-1, 1]`,
    /// and previous weight changes are zero.
    pub fn with_rng<R: Rng>(config: &NetworkConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let layers = config.layers.clone();
        let neurons = init_neurons(&layers, config.has_bias);
        let weights: Vec<Vec<Vec<f64>>> = (0..layers.len() - 1)
            .map(|l| {
                (0..neurons[l].len())
                    .map(|_| (0..layers[l + 1]).map(|_| initial_weight(rng)).collect())
                    .collect()
            })
            .collect();
        let previous_weight_changes = zeros_like(&weights);

        tracing::debug!(layers = ?layers, has_bias = config.has_bias, "network initialized");

        Ok(Self {
            deltas: init_deltas(&layers, &neurons),
            layers,
            learning_rate: config.learning_rate,
            momentum: config.momentum,
            has_bias: config.has_bias,
            neurons,
            weights,
            previous_weight_changes,
        })
    }

    /// Runs a forward pass and returns the output activations.
    ///
    /// Fails with [`Error::Dimension`] if `inputs.len()` differs from the
    /// input layer width.
    pub fn eval(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.check_inputs(inputs)?;
        self.feedforward(inputs);
        Ok(self.outputs().to_vec())
    }

    /// One online training step on a single example.
    ///
    /// Runs the forward pass, back-propagates the error, updates every
    /// weight with momentum, and returns the quadratic error
    /// `0.5 · Σ (expected − output)²` of the pre-update outputs. Both
    /// vectors are validated before anything is computed.
    pub fn train(&mut self, inputs: &[f64], expected: &[f64]) -> Result<f64> {
        self.check_inputs(inputs)?;
        self.check_outputs(expected)?;
        self.feedforward(inputs);
        self.backpropagate(expected);
        Ok(self.quadratic_error(expected))
    }

    /// Trains on every sample once per epoch, in order.
    ///
    /// Returns the summed error of each epoch. Stops at the first sample
    /// with the wrong dimensions.
    pub fn train_epochs(
        &mut self,
        samples: &[(Vec<f64>, Vec<f64>)],
        epochs: usize,
    ) -> Result<Vec<f64>> {
        let mut history = Vec::with_capacity(epochs);
        for _ in 0..epochs {
            let mut total = 0.0;
            for (inputs, expected) in samples {
                total += self.train(inputs, expected)?;
            }
            history.push(total);
        }
        Ok(history)
    }

    /// Captures the persisted state.
    pub fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            layers: self.layers.clone(),
            has_bias: self.has_bias,
            learning_rate: self.learning_rate,
            momentum: self.momentum,
            weights: self.weights.clone(),
            previous_weight_changes: self.previous_weight_changes.clone(),
            neurons: self.neurons.clone(),
        }
    }

    /// Rebuilds a network from a snapshot.
    ///
    /// Fails with [`Error::Configuration`] for bad hyperparameters and with
    /// [`Error::Dimension`] if any array does not match `layers`/`has_bias`.
    pub fn restore(snapshot: NetworkSnapshot) -> Result<Self> {
        let NetworkSnapshot {
            layers,
            has_bias,
            learning_rate,
            momentum,
            weights,
            previous_weight_changes,
            neurons,
        } = snapshot;

        validate_hyperparameters(&layers, learning_rate, momentum)?;
        let expected_neurons = init_neurons(&layers, has_bias);
        check_len("snapshot neuron layers", expected_neurons.len(), neurons.len())?;
        for (want, got) in expected_neurons.iter().zip(&neurons) {
            check_len("snapshot neuron layer", want.len(), got.len())?;
        }
        check_matrices("snapshot weights", &layers, &neurons, &weights)?;
        check_matrices(
            "snapshot previous weight changes",
            &layers,
            &neurons,
            &previous_weight_changes,
        )?;

        tracing::debug!(layers = ?layers, has_bias, "network restored from snapshot");

        Ok(Self {
            deltas: init_deltas(&layers, &neurons),
            layers,
            learning_rate,
            momentum,
            has_bias,
            neurons,
            weights,
            previous_weight_changes,
        })
    }

    /// Layer widths, input first.
    pub fn layers(&self) -> &[usize] {
        &self.layers
    }

    /// Activations of every layer, including bias units.
    pub fn neurons(&self) -> &[Vec<f64>] {
        &self.neurons
    }

    /// Weight matrices indexed `[layer][from][to]`.
    pub fn weights(&self) -> &[Vec<Vec<f64>>] {
        &self.weights
    }

    /// Weight changes from the last training step, same shape as `weights`.
    pub fn previous_weight_changes(&self) -> &[Vec<Vec<f64>>] {
        &self.previous_weight_changes
    }

    /// Activations of the output layer from the last forward pass.
    pub fn outputs(&self) -> &[f64] {
        self.neurons.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Learning rate.
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Momentum.
    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    /// Whether non-output layers carry a bias unit.
    pub fn has_bias(&self) -> bool {
        self.has_bias
    }

    fn check_inputs(&self, inputs: &[f64]) -> Result<()> {
        check_len("inputs", self.layers[0], inputs.len())
    }

    fn check_outputs(&self, expected: &[f64]) -> Result<()> {
        check_len("expected outputs", self.layers[self.layers.len() - 1], expected.len())
    }

    fn feedforward(&mut self, inputs: &[f64]) {
        self.neurons[0][..inputs.len()].copy_from_slice(inputs);
        for l in 0..self.weights.len() {
            let (lower, upper) = self.neurons.split_at_mut(l + 1);
            let from = &lower[l];
            let to = &mut upper[0];
            let weights = &self.weights[l];
            for j in 0..self.layers[l + 1] {
                let sum: f64 = from
                    .iter()
                    .zip(weights)
                    .map(|(&activation, row)| activation * row[j])
                    .sum();
                to[j] = sigmoid(sum);
            }
        }
    }

    fn backpropagate(&mut self, expected: &[f64]) {
        self.output_deltas(expected);
        self.inner_deltas();
        self.update_weights();
    }

    fn output_deltas(&mut self, expected: &[f64]) {
        let last = self.layers.len() - 1;
        let outputs = &self.neurons[last];
        for (k, delta) in self.deltas[last].iter_mut().enumerate() {
            *delta = sigmoid_derivative(outputs[k]) * (expected[k] - outputs[k]);
        }
    }

    /// Error terms for hidden layers, from the last hidden layer backwards.
    fn inner_deltas(&mut self) {
        for l in (1..self.layers.len() - 1).rev() {
            let (lower, upper) = self.deltas.split_at_mut(l + 1);
            let next = &upper[0];
            for (j, delta) in lower[l].iter_mut().enumerate() {
                let error: f64 = next
                    .iter()
                    .zip(&self.weights[l][j])
                    .map(|(d, w)| d * w)
                    .sum();
                *delta = sigmoid_derivative(self.neurons[l][j]) * error;
            }
        }
    }

    fn update_weights(&mut self) {
        for l in (0..self.weights.len()).rev() {
            let to_deltas = &self.deltas[l + 1];
            for (i, row) in self.weights[l].iter_mut().enumerate() {
                let activation = self.neurons[l][i];
                let previous = &mut self.previous_weight_changes[l][i];
                for (j, weight) in row.iter_mut().enumerate() {
                    let change = to_deltas[j] * activation;
                    *weight += self.learning_rate * change + self.momentum * previous[j];
                    previous[j] = change;
                }
            }
        }
    }

    fn quadratic_error(&self, expected: &[f64]) -> f64 {
        self.outputs()
            .iter()
            .zip(expected)
            .map(|(y, e)| 0.5 * (e - y).powi(2))
            .sum()
    }
}

/// All-ones activations, plus a bias unit on every layer but the last.
fn init_neurons(layers: &[usize], has_bias: bool) -> Vec<Vec<f64>> {
    let last = layers.len() - 1;
    layers
        .iter()
        .enumerate()
        .map(|(l, &width)| {
            let bias = usize::from(has_bias && l < last);
            vec![1.0; width + bias]
        })
        .collect()
}

/// One delta per unit of each layer (bias included).
fn init_deltas(layers: &[usize], neurons: &[Vec<f64>]) -> Vec<Vec<f64>> {
    (0..layers.len()).map(|l| vec![0.0; neurons[l].len()]).collect()
}

fn zeros_like(matrices: &[Vec<Vec<f64>>]) -> Vec<Vec<Vec<f64>>> {
    matrices
        .iter()
        .map(|m| m.iter().map(|row| vec![0.0; row.len()]).collect())
        .collect()
}

fn check_len(context: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::dimension(context, expected, actual));
    }
    Ok(())
}

/// Checks `matrices[l]` is `neurons[l].len() × layers[l + 1]` for every `l`.
fn check_matrices(
    context: &'static str,
    layers: &[usize],
    neurons: &[Vec<f64>],
    matrices: &[Vec<Vec<f64>>],
) -> Result<()> {
    check_len(context, layers.len() - 1, matrices.len())?;
    for (l, matrix) in matrices.iter().enumerate() {
        check_len(context, neurons[l].len(), matrix.len())?;
        for row in matrix {
            check_len(context, layers[l + 1], row.len())?;
        }
    }
    Ok(())
}
