//! Stochastic optimization engines.
//!
//! Two independent engines:
//!
//! - **Genetic Algorithm (GA)**: Evolves permutations that minimize the
//!   pairwise cost of an open tour, using roulette-wheel selection, order
//!   crossover and swap mutation.
//! - **Backpropagation network**: A layered feed-forward network of sigmoid
//!   units trained one example at a time by gradient descent with momentum.
//!
//! Both are single-threaded and synchronous. All randomness flows through an
//! explicitly seeded RNG (see [`random`]), so runs are reproducible.

pub mod error;
pub mod ga;
pub mod nn;
pub mod random;

pub use error::{Error, Result};
