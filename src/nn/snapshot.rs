//! Opaque network snapshots.
//!
//! A snapshot holds exactly the persisted state of a network. Activation
//! functions are not part of it; a restored network always uses the
//! logistic sigmoid.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Serializable state of a [`Backpropagation`](super::Backpropagation)
/// network.
///
/// Obtain one with [`Backpropagation::snapshot`](super::Backpropagation::snapshot)
/// and turn it back into a network with
/// [`Backpropagation::restore`](super::Backpropagation::restore).
///
/// # Examples
///
/// ```
/// use u_cogai::nn::{Backpropagation, NetworkConfig, NetworkSnapshot};
///
/// let mut net = Backpropagation::new(&NetworkConfig::new(vec![2, 3, 1]).with_seed(1)).unwrap();
/// let blob = net.snapshot().to_bytes().unwrap();
///
/// let snapshot = NetworkSnapshot::from_bytes(&blob).unwrap();
/// let mut restored = Backpropagation::restore(snapshot).unwrap();
/// let (a, b) = (net.eval(&[0.5, 0.5]).unwrap(), restored.eval(&[0.5, 0.5]).unwrap());
/// assert!((a[0] - b[0]).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    /// Layer widths, input first.
    pub layers: Vec<usize>,
    /// Whether non-output layers carry a bias unit.
    pub has_bias: bool,
    /// Learning rate.
    pub learning_rate: f64,
    /// Momentum.
    pub momentum: f64,
    /// Weight matrices `[layer][from][to]`.
    pub weights: Vec<Vec<Vec<f64>>>,
    /// Last weight changes, same shape as `weights`.
    pub previous_weight_changes: Vec<Vec<Vec<f64>>>,
    /// Activations of every layer, bias units included.
    pub neurons: Vec<Vec<f64>>,
}

impl NetworkSnapshot {
    /// Encodes the snapshot as an opaque byte blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decodes a blob produced by [`to_bytes`](Self::to_bytes).
    ///
    /// Only the encoding is checked here; shape validation happens in
    /// `Backpropagation::restore`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::nn::{Backpropagation, NetworkConfig};

    fn trained_net() -> Backpropagation {
        let config = NetworkConfig::new(vec![3, 4, 2])
            .with_learning_rate(0.3)
            .with_momentum(0.2)
            .with_seed(42);
        let mut net = Backpropagation::new(&config).unwrap();
        for _ in 0..200 {
            net.train(&[0.1, 0.2, 0.7], &[1.0, 0.0]).unwrap();
            net.train(&[0.9, 0.4, 0.1], &[0.0, 1.0]).unwrap();
        }
        net
    }

    #[test]
    fn test_snapshot_has_all_state() {
        let net = trained_net();
        let snap = net.snapshot();
        assert_eq!(snap.layers, vec![3, 4, 2]);
        assert!(snap.has_bias);
        assert!((snap.learning_rate - 0.3).abs() < 1e-12);
        assert!((snap.momentum - 0.2).abs() < 1e-12);
        assert_eq!(snap.weights, net.weights());
        assert_eq!(snap.previous_weight_changes, net.previous_weight_changes());
        assert_eq!(snap.neurons, net.neurons());
    }

    #[test]
    fn test_round_trip_evaluates_identically() {
        let mut net = trained_net();
        let blob = net.snapshot().to_bytes().unwrap();
        let decoded = NetworkSnapshot::from_bytes(&blob).unwrap();
        let mut restored = Backpropagation::restore(decoded).unwrap();

        for inputs in [[0.1, 0.2, 0.7], [0.9, 0.4, 0.1], [0.5, 0.5, 0.5]] {
            let a = net.eval(&inputs).unwrap();
            let b = restored.eval(&inputs).unwrap();
            for (x, y) in a.iter().zip(&b) {
                assert!((x - y).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_restored_network_keeps_training_identically() {
        let mut net = trained_net();
        let mut restored = Backpropagation::restore(net.snapshot()).unwrap();
        let a = net.train(&[0.3, 0.3, 0.3], &[0.5, 0.5]).unwrap();
        let b = restored.train(&[0.3, 0.3, 0.3], &[0.5, 0.5]).unwrap();
        assert_eq!(a, b);
        assert_eq!(net.weights(), restored.weights());
    }

    #[test]
    fn test_malformed_blob() {
        let err = NetworkSnapshot::from_bytes(b"not a snapshot").unwrap_err();
        assert!(matches!(err, Error::Snapshot(_)));
    }

    #[test]
    fn test_restore_rejects_wrong_weight_shape() {
        let mut snap = trained_net().snapshot();
        snap.weights[1].pop();
        assert!(matches!(
            Backpropagation::restore(snap),
            Err(Error::Dimension { .. })
        ));
    }

    #[test]
    fn test_restore_rejects_wrong_change_shape() {
        let mut snap = trained_net().snapshot();
        snap.previous_weight_changes[0][0].push(0.0);
        assert!(Backpropagation::restore(snap).is_err());
    }

    #[test]
    fn test_restore_rejects_missing_bias_unit() {
        let mut snap = trained_net().snapshot();
        snap.has_bias = false;
        assert!(matches!(
            Backpropagation::restore(snap),
            Err(Error::Dimension { .. })
        ));
    }

    #[test]
    fn test_restore_rejects_bad_hyperparameters() {
        let mut snap = trained_net().snapshot();
        snap.learning_rate = 0.0;
        assert!(matches!(
            Backpropagation::restore(snap),
            Err(Error::Configuration(_))
        ));
    }
}
