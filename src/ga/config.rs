//! GA run configuration.

use serde::{Deserialize, Serialize};

use super::operators::{GeneticOperators, MutationType};
use crate::models::PackingMode;

/// Parameters of one GA run.
///
/// # Example
///
/// ```
/// use u_timetable::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(10)
///     .with_seed(42)
///     .with_parallel(false);
/// assert_eq!(config.population_size, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Individuals per generation (default: 100).
    pub population_size: usize,
    /// Generations evolved after the initial population (default: 10).
    pub max_generations: usize,
    /// Probability of order crossover per child (default: 1.0).
    pub crossover_rate: f64,
    /// Probability of mutation per child (default: 1.0).
    pub mutation_rate: f64,
    /// Mutation strategy (default: swap).
    pub mutation_type: MutationType,
    /// RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Evaluate individuals on the rayon thread pool (default: true).
    pub parallel: bool,
    /// Stop as soon as the best schedule places every task (default: false).
    pub stop_when_all_placed: bool,
    /// Slot packing behavior of the greedy constructor (default: strict).
    pub packing: PackingMode,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 10,
            crossover_rate: 1.0,
            mutation_rate: 1.0,
            mutation_type: MutationType::Swap,
            seed: None,
            parallel: true,
            stop_when_all_placed: false,
            packing: PackingMode::Strict,
        }
    }
}

impl GaConfig {
    /// Sets the population size (at least 1).
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size.max(1);
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the crossover rate, clamped to [0, 1].
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate, clamped to [0, 1].
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation strategy.
    pub fn with_mutation_type(mut self, mutation_type: MutationType) -> Self {
        self.mutation_type = mutation_type;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enables or disables early exit once every task is placed.
    pub fn with_stop_when_all_placed(mut self, stop: bool) -> Self {
        self.stop_when_all_placed = stop;
        self
    }

    /// Sets the packing mode.
    pub fn with_packing(mut self, packing: PackingMode) -> Self {
        self.packing = packing;
        self
    }

    /// Operators described by this configuration.
    pub fn operators(&self) -> GeneticOperators {
        GeneticOperators {
            crossover_rate: self.crossover_rate,
            mutation_rate: self.mutation_rate,
            mutation_type: self.mutation_type,
        }
    }
}
