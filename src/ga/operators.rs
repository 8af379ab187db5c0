//! Configurable genetic operators.
//!
//! Provides roulette selection and the rate-gated crossover/mutation
//! pipeline applied to every non-elite child.
//!
//! # Usage
//!
//! ```
//! use u_timetable::ga::operators::{GeneticOperators, MutationType};
//!
//! let ops = GeneticOperators::default();
//! assert_eq!(ops.mutation_type, MutationType::Swap);
//! assert_eq!(ops.crossover_rate, 1.0);
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::chromosome::{insert_mutation, order_crossover, swap_mutation};

/// Mutation strategy for task orderings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationType {
    /// Exchange two distinct positions.
    #[default]
    Swap,
    /// Remove one task and reinsert it elsewhere.
    Insert,
}

/// Crossover and mutation applied when breeding one child.
#[derive(Debug, Clone)]
pub struct GeneticOperators {
    /// Probability of order crossover; otherwise the child copies parent B.
    pub crossover_rate: f64,
    /// Probability of mutating the child.
    pub mutation_rate: f64,
    /// Mutation strategy.
    pub mutation_type: MutationType,
}

impl Default for GeneticOperators {
    fn default() -> Self {
        Self {
            crossover_rate: 1.0,
            mutation_rate: 1.0,
            mutation_type: MutationType::Swap,
        }
    }
}

impl GeneticOperators {
    /// Breeds one child ordering from parents `a` and `b`.
    pub fn offspring<R: Rng>(&self, a: &[usize], b: &[usize], rng: &mut R) -> Vec<usize> {
        let mut child = if rng.random_bool(self.crossover_rate.clamp(0.0, 1.0)) {
            order_crossover(a, b, rng)
        } else {
            b.to_vec()
        };

        if rng.random_bool(self.mutation_rate.clamp(0.0, 1.0)) {
            self.mutate(&mut child, rng);
        }
        child
    }

    /// Mutates an ordering using the configured strategy.
    pub fn mutate<R: Rng>(&self, genes: &mut Vec<usize>, rng: &mut R) {
        match self.mutation_type {
            MutationType::Swap => swap_mutation(genes, rng),
            MutationType::Insert => insert_mutation(genes, rng),
        }
    }
}

/// Fitness-proportional (roulette wheel) selection.
///
/// Negative and non-finite fitness values get zero weight. When the
/// total weight is zero every individual is equally likely. Returns
/// `None` for an empty population.
pub fn roulette_select<R: Rng>(fitness: &[f64], rng: &mut R) -> Option<usize> {
    if fitness.is_empty() {
        return None;
    }

    let weight = |f: f64| if f.is_finite() { f.max(0.0) } else { 0.0 };
    let total: f64 = fitness.iter().map(|&f| weight(f)).sum();
    if total <= 0.0 {
        return Some(rng.random_range(0..fitness.len()));
    }

    let pick = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &f) in fitness.iter().enumerate() {
        cumulative += weight(f);
        if cumulative > pick {
            return Some(i);
        }
    }
    // Rounding can leave `pick` just past the last bucket.
    Some(fitness.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::chromosome::is_permutation;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_operators() {
        let ops = GeneticOperators::default();
        assert_eq!(ops.mutation_type, MutationType::Swap);
        assert_eq!(ops.crossover_rate, 1.0);
        assert_eq!(ops.mutation_rate, 1.0);
    }

    #[test]
    fn test_no_crossover_copies_parent_b() {
        let ops = GeneticOperators {
            crossover_rate: 0.0,
            mutation_rate: 0.0,
            mutation_type: MutationType::Swap,
        };
        let mut rng = SmallRng::seed_from_u64(42);
        let a = vec![0, 1, 2, 3];
        let b = vec![3, 2, 1, 0];
        assert_eq!(ops.offspring(&a, &b, &mut rng), b);
    }

    #[test]
    fn test_offspring_is_permutation() {
        let a: Vec<usize> = (0..12).collect();
        let b: Vec<usize> = (0..12).rev().collect();
        for mutation_type in [MutationType::Swap, MutationType::Insert] {
            let ops = GeneticOperators {
                mutation_type,
                ..GeneticOperators::default()
            };
            for seed in 0..50 {
                let mut rng = SmallRng::seed_from_u64(seed);
                let child = ops.offspring(&a, &b, &mut rng);
                assert!(is_permutation(&child, 12));
            }
        }
    }

    #[test]
    fn test_rates_are_clamped() {
        let ops = GeneticOperators {
            crossover_rate: 7.0,
            mutation_rate: -1.0,
            mutation_type: MutationType::Swap,
        };
        let mut rng = SmallRng::seed_from_u64(3);
        let child = ops.offspring(&[0, 1, 2], &[2, 1, 0], &mut rng);
        assert!(is_permutation(&child, 3));
    }

    #[test]
    fn test_mutation_type_serde() {
        let t: MutationType = serde_json::from_str("\"insert\"").unwrap();
        assert_eq!(t, MutationType::Insert);
        assert_eq!(serde_json::to_string(&MutationType::Swap).unwrap(), "\"swap\"");
    }

    #[test]
    fn test_roulette_proportional() {
        let mut rng = SmallRng::seed_from_u64(42);
        let fitness = [1.0, 0.0, 3.0];
        let mut counts = [0usize; 3];
        for _ in 0..4000 {
            counts[roulette_select(&fitness, &mut rng).unwrap()] += 1;
        }
        assert_eq!(counts[1], 0);
        // Expected ratio 1:3.
        assert!(counts[2] > counts[0] * 2);
        assert!(counts[0] > 500);
    }

    #[test]
    fn test_roulette_zero_total_is_uniform() {
        let mut rng = SmallRng::seed_from_u64(42);
        let fitness = [0.0, 0.0, 0.0, 0.0];
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            counts[roulette_select(&fitness, &mut rng).unwrap()] += 1;
        }
        assert!(counts.iter().all(|&c| c > 800));
    }

    #[test]
    fn test_roulette_ignores_non_finite() {
        let mut rng = SmallRng::seed_from_u64(5);
        let fitness = [f64::NEG_INFINITY, 2.0, f64::NAN];
        for _ in 0..200 {
            assert_eq!(roulette_select(&fitness, &mut rng), Some(1));
        }
    }

    #[test]
    fn test_roulette_empty() {
        let mut rng = SmallRng::seed_from_u64(5);
        assert_eq!(roulette_select(&[], &mut rng), None);
    }
}
