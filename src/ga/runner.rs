//! GA evolutionary loop execution.
//!
//! [`GaRunner`] is the evolution engine. It owns the population and drives
//! it through `initialize → (selection → reproduction) × generations`.

use super::chromosome::Chromosome;
use super::config::GaConfig;
use super::selection::{roulette_mating_pool, MatingPool};
use super::types::CostMatrix;
use crate::error::{Error, Result};
use crate::random::rng_from_seed;
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::Arc;

/// Lifecycle of a [`GaRunner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No population yet.
    Idle,
    /// Random population created, no generation run.
    Initialized,
    /// Building the mating pool.
    Selecting,
    /// Breeding the next generation.
    Reproducing,
    /// `evolve` finished.
    Done,
}

/// Population summary reported after each generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,
    /// Highest fitness in the new population.
    pub best_fitness: f64,
    /// Mean fitness of the new population.
    pub mean_fitness: f64,
    /// Lowest fitness in the new population.
    pub worst_fitness: f64,
    /// Size of the mating pool the generation was bred from.
    pub mating_pool_size: usize,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Best individual of the final population.
    pub best: Chromosome,

    /// Fitness of `best` (negated tour cost).
    pub best_fitness: f64,

    /// Best individual seen in any generation, including the initial one.
    ///
    /// Without elitism the final population can lose an earlier optimum, so
    /// this may beat `best`.
    pub best_ever: Chromosome,

    /// Fitness of `best_ever`.
    pub best_ever_fitness: f64,

    /// Total number of generations executed.
    pub generations: usize,

    /// Best fitness of the population at the start and after each generation.
    pub fitness_history: Vec<f64>,
}

/// Permutation GA over a shared cost matrix.
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use u_cogai::ga::{CostMatrix, GaConfig, GaRunner};
///
/// let costs = Arc::new(CostMatrix::from_fn(5, |i, j| (i as f64 - j as f64).abs()).unwrap());
/// let config = GaConfig::new(30, 20).with_seed(42);
/// let mut runner = GaRunner::new(config, costs).unwrap();
/// let result = runner.evolve().unwrap();
/// assert_eq!(result.best.len(), 5);
/// assert!(result.best_fitness <= -4.0);
/// ```
#[derive(Debug)]
pub struct GaRunner {
    config: GaConfig,
    costs: Arc<CostMatrix>,
    population: Vec<Chromosome>,
    generation: usize,
    state: EngineState,
    rng: StdRng,
}

impl GaRunner {
    /// Creates an idle engine.
    ///
    /// Fails with [`Error::Configuration`] if `config` is invalid.
    pub fn new(config: GaConfig, costs: Arc<CostMatrix>) -> Result<Self> {
        config.validate()?;
        let rng = rng_from_seed(config.seed);
        Ok(Self {
            config,
            costs,
            population: Vec::new(),
            generation: 0,
            state: EngineState::Idle,
            rng,
        })
    }

    /// One-shot convenience: build an engine and evolve it.
    pub fn run(costs: Arc<CostMatrix>, config: &GaConfig) -> Result<GaResult> {
        Self::new(config.clone(), costs)?.evolve()
    }

    /// Replaces the population with `population_size` random chromosomes
    /// and resets the generation counter.
    pub fn initialize_population(&mut self) {
        self.population = (0..self.config.population_size)
            .map(|_| Chromosome::randomize(&self.costs, &mut self.rng))
            .collect();
        self.generation = 0;
        self.state = EngineState::Initialized;
    }

    /// Roulette-wheel selection over the current population.
    ///
    /// Updates every individual's normalized fitness and returns the mating
    /// pool. Fails if the population has not been initialized.
    pub fn selection(&mut self) -> Result<MatingPool> {
        self.ensure_initialized()?;
        self.state = EngineState::Selecting;
        Ok(roulette_mating_pool(
            &mut self.population,
            self.config.population_size,
        ))
    }

    /// Breeds a full replacement population from `pool`.
    ///
    /// Every slot gets a child of two uniformly drawn pool members, which is
    /// then offered to mutation. No individual survives unchanged unless
    /// crossover reproduces it. An empty pool falls back to the whole
    /// population.
    pub fn reproduction(&mut self, pool: &MatingPool) -> Result<()> {
        self.ensure_initialized()?;
        self.state = EngineState::Reproducing;

        let fallback: Vec<usize>;
        let members = if pool.is_empty() {
            fallback = (0..self.population.len()).collect();
            &fallback[..]
        } else {
            pool.members()
        };
        if let Some(&bad) = members.iter().find(|&&m| m >= self.population.len()) {
            return Err(Error::config(format!(
                "mating pool refers to individual {bad}, population has {}",
                self.population.len()
            )));
        }

        let mut next = Vec::with_capacity(self.config.population_size);
        for _ in 0..self.config.population_size {
            let a = members[self.rng.random_range(0..members.len())];
            let b = members[self.rng.random_range(0..members.len())];
            let mut child =
                Chromosome::crossover(&self.population[a], &self.population[b], &mut self.rng)?;
            child.mutate(self.config.mutation_rate, &mut self.rng);
            next.push(child);
        }

        self.population = next;
        self.generation += 1;
        Ok(())
    }

    /// Runs the full evolutionary loop from a fresh population.
    pub fn evolve(&mut self) -> Result<GaResult> {
        self.evolve_with_observer(|_| {})
    }

    /// Runs the full loop, calling `observer` after every generation.
    pub fn evolve_with_observer<F>(&mut self, mut observer: F) -> Result<GaResult>
    where
        F: FnMut(&GenerationStats),
    {
        self.initialize_population();

        let mut best_ever = self.best_or_err()?.clone();
        let mut fitness_history = Vec::with_capacity(self.config.generations + 1);
        fitness_history.push(best_ever.fitness());

        for _ in 0..self.config.generations {
            let pool = self.selection()?;
            self.reproduction(&pool)?;

            let stats = self.stats(pool.len());
            tracing::debug!(
                generation = stats.generation,
                best = stats.best_fitness,
                mean = stats.mean_fitness,
                mating_pool = stats.mating_pool_size,
                "ga generation complete"
            );
            observer(&stats);

            let gen_best = self.best_or_err()?;
            if gen_best.fitness() > best_ever.fitness() {
                best_ever = gen_best.clone();
            }
            fitness_history.push(stats.best_fitness);
        }

        self.state = EngineState::Done;
        let best = self.best_or_err()?.clone();
        tracing::info!(
            generations = self.generation,
            best = best.fitness(),
            best_ever = best_ever.fitness(),
            "ga evolve finished"
        );

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            best_ever_fitness: best_ever.fitness(),
            best_ever,
            generations: self.generation,
            fitness_history,
        })
    }

    /// Individual with the highest fitness (lowest tour cost), if any.
    pub fn best_chromosome(&self) -> Option<&Chromosome> {
        find_best(&self.population)
    }

    /// Current population.
    pub fn population(&self) -> &[Chromosome] {
        &self.population
    }

    /// Number of generations bred since the last initialization.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// The shared cost matrix.
    pub fn costs(&self) -> &Arc<CostMatrix> {
        &self.costs
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.state == EngineState::Idle {
            return Err(Error::config("population has not been initialized"));
        }
        Ok(())
    }

    fn best_or_err(&self) -> Result<&Chromosome> {
        self.best_chromosome()
            .ok_or_else(|| Error::config("population is empty"))
    }

    fn stats(&self, mating_pool_size: usize) -> GenerationStats {
        let n = self.population.len() as f64;
        let (mut best, mut worst, mut sum) = (f64::NEG_INFINITY, f64::INFINITY, 0.0);
        for c in &self.population {
            let f = c.fitness();
            best = best.max(f);
            worst = worst.min(f);
            sum += f;
        }
        GenerationStats {
            generation: self.generation,
            best_fitness: best,
            mean_fitness: sum / n,
            worst_fitness: worst,
            mating_pool_size,
        }
    }
}

/// Find the individual with the best (highest) fitness.
fn find_best(population: &[Chromosome]) -> Option<&Chromosome> {
    population.iter().max_by(|a, b| {
        a.fitness()
            .partial_cmp(&b.fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

// ============================================================================
// Tests
// ============================================================================
