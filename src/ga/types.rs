//! Core data types shared by every chromosome in a GA run.
//!
//! The [`CostMatrix`] is built once, wrapped in an `Arc`, and handed to the
//! chromosome factories. It is never mutated afterwards, so independent runs
//! with different matrices can coexist in one process.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Square matrix of pairwise travel costs.
///
/// `cost(i, j)` is the cost of moving from city `i` to city `j`. The
/// dimension `N` fixes the length of every permutation evaluated against it.
///
/// Entries are not checked for finiteness: a `NaN` or infinite cost simply
/// propagates into the fitness of any tour that uses it.
///
/// # Examples
///
/// ```
/// use u_cogai::ga::CostMatrix;
///
/// let costs = CostMatrix::new(vec![
///     vec![0.0, 2.0, 9.0],
///     vec![2.0, 0.0, 4.0],
///     vec![9.0, 4.0, 0.0],
/// ]).unwrap();
/// assert_eq!(costs.dimension(), 3);
/// assert_eq!(costs.tour_cost(&[0, 1, 2]), 6.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct CostMatrix {
    dimension: usize,
    /// Row-major `dimension × dimension` storage.
    costs: Vec<f64>,
}

impl CostMatrix {
    /// Builds a matrix from rows.
    ///
    /// Fails with [`Error::Configuration`] if there are no rows or any row's
    /// length differs from the number of rows.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let dimension = rows.len();
        if dimension == 0 {
            return Err(Error::config("cost matrix must not be empty"));
        }
        let mut costs = Vec::with_capacity(dimension * dimension);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != dimension {
                return Err(Error::config(format!(
                    "cost matrix must be square: row {i} has {} entries, expected {dimension}",
                    row.len()
                )));
            }
            costs.extend(row);
        }
        Ok(Self { dimension, costs })
    }

    /// Builds a matrix by evaluating `f(from, to)` for every city pair.
    pub fn from_fn<F: FnMut(usize, usize) -> f64>(dimension: usize, mut f: F) -> Result<Self> {
        if dimension == 0 {
            return Err(Error::config("cost matrix must not be empty"));
        }
        let mut costs = Vec::with_capacity(dimension * dimension);
        for i in 0..dimension {
            for j in 0..dimension {
                costs.push(f(i, j));
            }
        }
        Ok(Self { dimension, costs })
    }

    /// Number of cities `N`.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Cost of the edge `from → to`.
    ///
    /// # Panics
    /// Panics if either index is `>= dimension()`.
    #[inline]
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        assert!(
            from < self.dimension && to < self.dimension,
            "city index out of range"
        );
        self.costs[from * self.dimension + to]
    }

    /// Whether both matrices hold bit-identical entries.
    ///
    /// Unlike `==`, a `NaN` entry matches the same `NaN` in `other`.
    pub fn same_entries(&self, other: &Self) -> bool {
        self.dimension == other.dimension
            && self
                .costs
                .iter()
                .zip(&other.costs)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }

    /// Sum of edge costs along consecutive genes (an open path, no return leg).
    ///
    /// Sequences shorter than two cities cost `0.0`.
    pub fn tour_cost(&self, genes: &[usize]) -> f64 {
        genes.windows(2).map(|w| self.cost(w[0], w[1])).sum()
    }
}

impl TryFrom<Vec<Vec<f64>>> for CostMatrix {
    type Error = Error;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(rows)
    }
}

impl From<CostMatrix> for Vec<Vec<f64>> {
    fn from(matrix: CostMatrix) -> Self {
        matrix
            .costs
            .chunks(matrix.dimension)
            .map(<[f64]>::to_vec)
            .collect()
    }
}

/// Cached fitness of a chromosome.
///
/// Starts as `Uncomputed`, becomes `Computed` on first read, and is reset
/// to `Uncomputed` by any change to the genes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitnessState {
    /// Genes changed since the last evaluation (or were never evaluated).
    Uncomputed,
    /// Negated tour cost of the current genes.
    Computed(f64),
}

impl FitnessState {
    /// Returns the cached value, if any.
    pub fn value(self) -> Option<f64> {
        match self {
            FitnessState::Computed(f) => Some(f),
            FitnessState::Uncomputed => None,
        }
    }
}
