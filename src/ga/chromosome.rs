//! Permutation genome with lazily cached fitness.

use super::operators::{
    is_permutation, order_crossover, random_cut_points, random_permutation, swap_mutation,
};
use super::types::{CostMatrix, FitnessState};
use crate::error::{Error, Result};
use rand::Rng;
use std::cell::Cell;
use std::sync::Arc;

/// Default per-call mutation probability. Kept tiny so that mutation is rare.
pub const DEFAULT_MUTATION_RATE: f64 = 1e-6;

/// A candidate tour: a permutation of `0..N` evaluated against a shared
/// [`CostMatrix`].
///
/// Fitness is the negated tour cost, so higher is better. It is computed on
/// first access and cached in a [`FitnessState`] until the genes change.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_cogai::ga::{Chromosome, CostMatrix};
///
/// let costs = Arc::new(CostMatrix::from_fn(3, |i, j| (i as f64 - j as f64).abs()).unwrap());
/// let c = Chromosome::new(costs, vec![2, 1, 0]).unwrap();
/// assert_eq!(c.fitness(), -2.0);
/// ```
#[derive(Debug, Clone)]
pub struct Chromosome {
    genes: Vec<usize>,
    costs: Arc<CostMatrix>,
    fitness: Cell<FitnessState>,
    normalized_fitness: f64,
}

impl Chromosome {
    /// Wraps an explicit gene sequence.
    ///
    /// Fails with [`Error::Configuration`] unless `genes` is a permutation of
    /// `0..costs.dimension()`.
    pub fn new(costs: Arc<CostMatrix>, genes: Vec<usize>) -> Result<Self> {
        if !is_permutation(&genes, costs.dimension()) {
            return Err(Error::config(format!(
                "genes must be a permutation of 0..{}",
                costs.dimension()
            )));
        }
        Ok(Self::from_valid(costs, genes))
    }

    fn from_valid(costs: Arc<CostMatrix>, genes: Vec<usize>) -> Self {
        Self {
            genes,
            costs,
            fitness: Cell::new(FitnessState::Uncomputed),
            normalized_fitness: 0.0,
        }
    }

    /// Creates a chromosome with a uniformly random permutation of
    /// `0..costs.dimension()`.
    pub fn randomize<R: Rng>(costs: &Arc<CostMatrix>, rng: &mut R) -> Self {
        let genes = random_permutation(costs.dimension(), rng);
        Self::from_valid(Arc::clone(costs), genes)
    }

    /// Produces a child by order crossover of `parent_a` (segment donor)
    /// and `parent_b` (fill donor).
    ///
    /// Fails with [`Error::Dimension`] if the parents differ in length and
    /// with [`Error::Configuration`] if they were built against different
    /// cost matrices.
    pub fn crossover<R: Rng>(parent_a: &Self, parent_b: &Self, rng: &mut R) -> Result<Self> {
        let n = parent_a.genes.len();
        if parent_b.genes.len() != n {
            return Err(Error::dimension("crossover parent", n, parent_b.genes.len()));
        }
        let same_costs = Arc::ptr_eq(&parent_a.costs, &parent_b.costs)
            || parent_a.costs.same_entries(&parent_b.costs);
        if !same_costs {
            return Err(Error::config("crossover parents use different cost matrices"));
        }

        if n < 2 {
            return Ok(Self::from_valid(Arc::clone(&parent_a.costs), parent_a.genes.clone()));
        }

        let (start, end) = random_cut_points(n, rng);
        let genes = order_crossover(&parent_a.genes, &parent_b.genes, start, end);
        Ok(Self::from_valid(Arc::clone(&parent_a.costs), genes))
    }

    /// With probability `rate`, swaps two random gene positions and resets
    /// the cached fitness. Returns whether a swap was attempted.
    pub fn mutate<R: Rng>(&mut self, rate: f64, rng: &mut R) -> bool {
        if rng.random::<f64>() >= rate {
            return false;
        }
        swap_mutation(&mut self.genes, rng);
        self.invalidate();
        true
    }

    /// Negated cost of the path through the genes in order.
    ///
    /// Computed once per gene state.
    pub fn fitness(&self) -> f64 {
        match self.fitness.get() {
            FitnessState::Computed(f) => f,
            FitnessState::Uncomputed => {
                let f = -self.costs.tour_cost(&self.genes);
                self.fitness.set(FitnessState::Computed(f));
                f
            }
        }
    }

    /// Current cache state, without triggering evaluation.
    pub fn fitness_state(&self) -> FitnessState {
        self.fitness.get()
    }

    /// Fitness rescaled to `[0, 1]` by the last selection pass.
    pub fn normalized_fitness(&self) -> f64 {
        self.normalized_fitness
    }

    pub(crate) fn set_normalized_fitness(&mut self, value: f64) {
        self.normalized_fitness = value;
    }

    /// The gene sequence.
    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    /// Number of genes `N`.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` if the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// The cost matrix this chromosome is evaluated against.
    pub fn costs(&self) -> &Arc<CostMatrix> {
        &self.costs
    }

    fn invalidate(&mut self) {
        self.fitness.set(FitnessState::Uncomputed);
    }
}
