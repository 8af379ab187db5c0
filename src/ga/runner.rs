//! Generational GA over task orderings.
//!
//! # Algorithm
//!
//! 1. **Initialize**: group tasks by priority (ascending). Each individual
//!    concatenates the groups, shuffling every group independently.
//! 2. **Evolve**: the best individual is copied unchanged (elitism of one).
//!    Every other slot is filled by a child of two roulette-selected
//!    parents (order crossover, then mutation).
//! 3. **Evaluate**: only new children are decoded and scored. Evaluations
//!    are independent and run on the rayon pool when `parallel` is set.
//! 4. **Terminate** after `max_generations`, or earlier when
//!    `stop_when_all_placed` is set and the best schedule is complete.
//!
//! All random draws happen on the calling thread from one `SmallRng`, so a
//! seeded run returns the same result with or without parallelism.

use std::collections::BTreeMap;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::chromosome::OrderingChromosome;
use super::config::GaConfig;
use super::operators::{roulette_select, GeneticOperators};
use crate::models::TimetableProblem;
use crate::scheduler::{FitnessEvaluator, FitnessWeights, GreedyConstructor};

/// Outcome of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Best individual found across the whole run.
    pub best: OrderingChromosome,
    /// Best fitness of the initial population, then of each generation.
    pub history: Vec<f64>,
    /// Generations evolved.
    pub generations: usize,
}

/// GA driver for one timetabling problem.
pub struct GeneticScheduler<'a> {
    problem: &'a TimetableProblem,
    config: GaConfig,
    operators: GeneticOperators,
    constructor: GreedyConstructor<'a>,
    evaluator: FitnessEvaluator<'a>,
}

impl<'a> GeneticScheduler<'a> {
    /// Creates a driver with default fitness weights.
    pub fn new(problem: &'a TimetableProblem, config: GaConfig) -> Self {
        let constructor = GreedyConstructor::new(problem).with_packing(config.packing);
        Self {
            problem,
            operators: config.operators(),
            config,
            constructor,
            evaluator: FitnessEvaluator::new(problem),
        }
    }

    /// Sets the fitness weights.
    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.evaluator = self.evaluator.with_weights(weights);
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Runs the GA, seeding from the config (or OS entropy).
    pub fn run(&self) -> GaResult {
        let mut rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        self.run_with_rng(&mut rng)
    }

    /// Runs the GA with a caller-supplied RNG.
    pub fn run_with_rng<R: Rng>(&self, rng: &mut R) -> GaResult {
        info!(
            "GA start: {} tasks, {} rooms, population {}, {} generations",
            self.problem.task_count(),
            self.problem.rooms.len(),
            self.population_size(),
            self.config.max_generations
        );

        let mut population = self.initialize(rng);
        let mut best = fittest(&population).clone();
        let mut history = vec![best.fitness];
        let mut generations = 0;

        while generations < self.config.max_generations {
            if self.config.stop_when_all_placed && best.schedule.is_complete() {
                info!("All tasks placed after {generations} generations, stopping");
                break;
            }

            population = self.evolve(&population, rng);
            generations += 1;

            let generation_best = fittest(&population);
            if generation_best.fitness > best.fitness {
                best = generation_best.clone();
            }
            history.push(generation_best.fitness);
            debug!(
                "Generation {generations}: best fitness {:.3}, placed {}/{}",
                generation_best.fitness,
                generation_best.schedule.placed_count(),
                self.problem.task_count()
            );
        }

        info!(
            "GA done: fitness {:.3}, placed {}/{} after {generations} generations",
            best.fitness,
            best.schedule.placed_count(),
            self.problem.task_count()
        );

        GaResult {
            best,
            history,
            generations,
        }
    }

    /// Builds and evaluates the initial population.
    pub fn initialize<R: Rng>(&self, rng: &mut R) -> Vec<OrderingChromosome> {
        let mut groups: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
        for (idx, task) in self.problem.tasks.iter().enumerate() {
            groups.entry(task.priority()).or_default().push(idx);
        }

        let mut population: Vec<OrderingChromosome> = (0..self.population_size())
            .map(|_| {
                let mut genes = Vec::with_capacity(self.problem.task_count());
                for group in groups.values() {
                    let start = genes.len();
                    genes.extend_from_slice(group);
                    genes[start..].shuffle(rng);
                }
                OrderingChromosome::new(genes)
            })
            .collect();

        self.evaluate_all(&mut population);
        population
    }

    /// Produces and evaluates the next generation.
    ///
    /// `population` must be evaluated and non-empty.
    pub fn evolve<R: Rng>(
        &self,
        population: &[OrderingChromosome],
        rng: &mut R,
    ) -> Vec<OrderingChromosome> {
        let size = self.population_size();
        let mut next = Vec::with_capacity(size);
        if population.is_empty() {
            return next;
        }

        next.push(fittest(population).clone());

        let fitness: Vec<f64> = population.iter().map(|c| c.fitness).collect();
        while next.len() < size {
            let (Some(a), Some(b)) = (
                roulette_select(&fitness, rng),
                roulette_select(&fitness, rng),
            ) else {
                break;
            };
            let genes = self
                .operators
                .offspring(&population[a].genes, &population[b].genes, rng);
            next.push(OrderingChromosome::new(genes));
        }

        self.evaluate_all(&mut next);
        next
    }

    fn evaluate_all(&self, population: &mut [OrderingChromosome]) {
        let evaluate = |c: &mut OrderingChromosome| {
            if !c.is_evaluated() {
                c.evaluate(&self.constructor, &self.evaluator);
            }
        };

        if self.config.parallel {
            population.par_iter_mut().for_each(evaluate);
        } else {
            population.iter_mut().for_each(evaluate);
        }
    }

    fn population_size(&self) -> usize {
        self.config.population_size.max(1)
    }
}

/// Highest-fitness individual (first one on ties).
///
/// `population` must be non-empty.
fn fittest(population: &[OrderingChromosome]) -> &OrderingChromosome {
    let mut best = &population[0];
    for c in &population[1..] {
        if c.fitness > best.fitness {
            best = c;
        }
    }
    best
}
