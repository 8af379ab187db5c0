//! GA search over task orderings.
//!
//! The greedy constructor is order dependent, so the GA only has to
//! search permutations: each chromosome is a task ordering, decoded by
//! the constructor and scored by the fitness evaluator.
//!
//! # Submodules
//!
//! - [`operators`]: Roulette selection and rate-gated crossover/mutation
//!
//! # Reference
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//!   Machine Learning"
//! - Colorni, Dorigo & Maniezzo (1998), "Metaheuristics for High School
//!   Timetabling"

mod chromosome;
mod config;
pub mod operators;
mod runner;

pub use chromosome::{
    insert_mutation, is_permutation, order_crossover, swap_mutation, OrderingChromosome,
};
pub use config::GaConfig;
pub use operators::{roulette_select, GeneticOperators, MutationType};
pub use runner::{GaResult, GeneticScheduler};
