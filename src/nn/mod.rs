//! Feed-forward neural network trained by backpropagation.
//!
//! A fully connected multi-layer perceptron with logistic units, optional
//! bias units, and momentum. Training is online: each call to
//! [`Backpropagation::train`] runs one forward pass, one backward pass and
//! one weight update for a single example.
//!
//! # Key Types
//!
//! - [`NetworkConfig`]: Layer widths, learning rate, momentum, bias, seed
//! - [`Backpropagation`]: The network and its training step
//! - [`NetworkSnapshot`]: Serializable state for save/restore
//!
//! # Submodules
//!
//! - [`activation`]: Sigmoid, its derivative, and weight initialization

pub mod activation;
mod config;
mod network;
mod snapshot;

pub use config::NetworkConfig;
pub use network::Backpropagation;
pub use snapshot::NetworkSnapshot;
