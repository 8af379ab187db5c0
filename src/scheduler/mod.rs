//! Greedy construction and fitness evaluation.
//!
//! # Algorithm
//!
//! `GreedyConstructor` turns a task ordering into a concrete schedule by
//! placing each task in the first candidate room whose occupancy grid can
//! host all of its weekly blocks. It is deterministic for a given order,
//! which lets a metaheuristic search over orderings alone.
//!
//! # Fitness
//!
//! `FitnessEvaluator` scores a schedule by placed tasks, per-teacher and
//! per-class-group room consistency, and satisfied time preferences.
//!
//! # References
//!
//! - Burke & Petrovic (2002), "Recent research directions in automated
//!   timetabling"
//! - Schaerf (1999), "A Survey of Automated Timetabling"

mod fitness;
mod greedy;

pub use fitness::{FitnessBreakdown, FitnessEvaluator, FitnessWeights};
pub use greedy::GreedyConstructor;
