//! Roulette-wheel mating pool construction.
//!
//! Each individual's fitness is min-max normalized to `[0, 1]` and the
//! individual is copied into the mating pool in proportion to its share of
//! the total normalized fitness.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1

use super::chromosome::Chromosome;

/// Indices into the population, each repeated once per mating-pool copy.
///
/// Because copy counts are rounded independently, the pool size is usually
/// close to, but not exactly, the population size.
#[derive(Debug, Clone, PartialEq)]
pub struct MatingPool {
    members: Vec<usize>,
    accumulated_fitness: f64,
}

impl MatingPool {
    /// Population indices in pool order.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Number of slots in the pool.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if rounding left the pool empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Sum of normalized fitness across the population (0 when all equal).
    pub fn accumulated_fitness(&self) -> f64 {
        self.accumulated_fitness
    }

    /// Number of pool copies of population index `idx`.
    pub fn copies_of(&self, idx: usize) -> usize {
        self.members.iter().filter(|&&m| m == idx).count()
    }
}

/// Builds a roulette-wheel mating pool and records each individual's
/// normalized fitness.
///
/// With a fitness spread `max - min > 0`, individual `i` is normalized to
/// `(f_i - min) / (max - min)` and receives
/// `round(norm_i / Σnorm * target_size)` copies. When every fitness is equal
/// all individuals are normalized to `1.0` and receive exactly one copy.
pub fn roulette_mating_pool(population: &mut [Chromosome], target_size: usize) -> MatingPool {
    let (min, max) = population
        .iter()
        .map(Chromosome::fitness)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), f| {
            (lo.min(f), hi.max(f))
        });

    let mut accumulated_fitness = 0.0;
    let spread = max - min;
    if spread > 0.0 {
        for c in population.iter_mut() {
            let norm = (c.fitness() - min) / spread;
            c.set_normalized_fitness(norm);
            accumulated_fitness += norm;
        }
    } else {
        for c in population.iter_mut() {
            c.set_normalized_fitness(1.0);
        }
    }

    let mut members = Vec::with_capacity(target_size);
    for (idx, c) in population.iter().enumerate() {
        let copies = if accumulated_fitness == 0.0 {
            1
        } else {
            (c.normalized_fitness() / accumulated_fitness * target_size as f64).round() as usize
        };
        members.extend(std::iter::repeat(idx).take(copies));
    }

    MatingPool {
        members,
        accumulated_fitness,
    }
}
