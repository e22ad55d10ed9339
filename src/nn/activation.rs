//! Logistic activation and weight initialization.
//!
//! These are plain functions: every network uses the same activation, so
//! nothing here is stored per instance or persisted in snapshots.

use rand::Rng;

/// Logistic sigmoid: `σ(x) = 1 / (1 + e^(-x))`.
#[inline]
#[must_use]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Sigmoid derivative expressed through the activation `y = σ(x)`:
/// `σ'(x) = y (1 - y)`.
#[inline]
#[must_use]
pub fn sigmoid_derivative(y: f64) -> f64 {
    y * (1.0 - y)
}

/// Draws an initial weight uniformly from `[-1, 1]`.
#[inline]
pub fn initial_weight<R: Rng>(rng: &mut R) -> f64 {
    rng.random_range(-1.0..=1.0)
}
