//! Permutation Genetic Algorithm.
//!
//! Evolves tours (permutations of city indices) that minimize the summed
//! pairwise cost along consecutive cities. Fitness is the negated cost, so
//! higher fitness is better.
//!
//! # Key Types
//!
//! - [`CostMatrix`]: Square matrix of pairwise costs, shared read-only by a run
//! - [`Chromosome`]: A tour with lazily cached fitness
//! - [`GaConfig`]: Population size, generation count, mutation rate, seed
//! - [`GaRunner`]: The evolution engine (roulette selection → OX crossover →
//!   swap mutation, full generational replacement)
//! - [`GaResult`]: Final-population best plus run statistics
//!
//! # Submodules
//!
//! - [`operators`]: Order crossover, swap mutation and permutation helpers on
//!   raw gene slices
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

mod chromosome;
mod config;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use chromosome::{Chromosome, DEFAULT_MUTATION_RATE};
pub use config::GaConfig;
pub use runner::{EngineState, GaResult, GaRunner, GenerationStats};
pub use selection::{roulette_mating_pool, MatingPool};
pub use types::{CostMatrix, FitnessState};
