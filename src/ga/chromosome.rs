//! Task-ordering chromosome.
//!
//! # Encoding
//!
//! A chromosome is a permutation of task indices. Decoding runs the
//! greedy constructor over that order, so every permutation decodes to a
//! feasible (possibly incomplete) schedule and no repair step is needed.
//!
//! # Reference
//! Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

use rand::Rng;

use crate::models::Schedule;
use crate::scheduler::{FitnessEvaluator, GreedyConstructor};

/// Task ordering paired with its decoded schedule.
///
/// Higher fitness = better schedule (maximization convention).
#[derive(Debug, Clone, PartialEq)]
pub struct OrderingChromosome {
    /// Task indices in construction order.
    pub genes: Vec<usize>,
    /// Schedule decoded from `genes`.
    pub schedule: Schedule,
    /// Fitness of `schedule` (`-inf` until evaluated).
    pub fitness: f64,
}

impl OrderingChromosome {
    /// Creates an unevaluated chromosome.
    pub fn new(genes: Vec<usize>) -> Self {
        Self {
            genes,
            schedule: Schedule::default(),
            fitness: f64::NEG_INFINITY,
        }
    }

    /// Whether the chromosome has been decoded and scored.
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_finite()
    }

    /// Decodes the ordering and scores the resulting schedule.
    pub fn evaluate(
        &mut self,
        constructor: &GreedyConstructor<'_>,
        evaluator: &FitnessEvaluator<'_>,
    ) {
        let mut schedule = constructor.construct(&self.genes);
        self.fitness = evaluator.score(&mut schedule);
        self.schedule = schedule;
    }

    /// Whether `genes` is a permutation of `0..n`.
    pub fn is_permutation(&self, n: usize) -> bool {
        is_permutation(&self.genes, n)
    }
}

/// Whether `genes` is a permutation of `0..n`.
pub fn is_permutation(genes: &[usize], n: usize) -> bool {
    if genes.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &g in genes {
        if g >= n || seen[g] {
            return false;
        }
        seen[g] = true;
    }
    true
}

// ======================== Crossover ========================

/// Order crossover (OX).
///
/// Copies a random contiguous range `[left, right]` of `b` into the same
/// positions of the child, then fills the remaining positions left to
/// right with the genes of `a` that are not already in the child, in the
/// order they appear in `a`.
///
/// Both parents must be permutations of the same set.
pub fn order_crossover<R: Rng>(a: &[usize], b: &[usize], rng: &mut R) -> Vec<usize> {
    let size = b.len();
    if size == 0 {
        return Vec::new();
    }

    let left = rng.random_range(0..size);
    let right = left + rng.random_range(0..size - left);

    let mut taken = vec![false; size];
    let mut child = vec![usize::MAX; size];
    for i in left..=right {
        child[i] = b[i];
        taken[b[i]] = true;
    }

    let mut donor = a.iter().copied().filter(|&g| !taken[g]);
    for (i, slot) in child.iter_mut().enumerate() {
        if (left..=right).contains(&i) {
            continue;
        }
        if let Some(g) = donor.next() {
            *slot = g;
        }
    }
    child
}

// ======================== Mutation ========================

/// Swap mutation: exchanges two distinct random positions.
pub fn swap_mutation<R: Rng>(genes: &mut [usize], rng: &mut R) {
    let len = genes.len();
    if len < 2 {
        return;
    }
    let i = rng.random_range(0..len);
    let mut j = rng.random_range(0..len - 1);
    if j >= i {
        j += 1;
    }
    genes.swap(i, j);
}

/// Insert mutation: removes a gene and reinserts it at a random position.
pub fn insert_mutation<R: Rng>(genes: &mut Vec<usize>, rng: &mut R) {
    let len = genes.len();
    if len < 2 {
        return;
    }
    let from = rng.random_range(0..len);
    let to = rng.random_range(0..len);
    let gene = genes.remove(from);
    genes.insert(to, gene);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    use crate::models::{Classroom, TaskRecord, TermGrid, TimetableProblem};

    fn shuffled(n: usize, rng: &mut SmallRng) -> Vec<usize> {
        let mut v: Vec<usize> = (0..n).collect();
        v.shuffle(rng);
        v
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[2, 0, 1], 3));
        assert!(is_permutation(&[], 0));
        assert!(!is_permutation(&[0, 0, 1], 3));
        assert!(!is_permutation(&[0, 1, 3], 3));
        assert!(!is_permutation(&[0, 1], 3));
    }

    #[test]
    fn test_order_crossover_yields_permutation() {
        for seed in 0..200 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let n = 1 + (seed as usize % 17);
            let a = shuffled(n, &mut rng);
            let b = shuffled(n, &mut rng);
            let child = order_crossover(&a, &b, &mut rng);
            assert!(is_permutation(&child, n), "seed {seed}: {child:?}");
        }
    }

    #[test]
    fn test_order_crossover_identical_parents() {
        let mut rng = SmallRng::seed_from_u64(7);
        let p = vec![3, 1, 4, 0, 2];
        for _ in 0..20 {
            assert_eq!(order_crossover(&p, &p, &mut rng), p);
        }
    }

    #[test]
    fn test_order_crossover_keeps_segment_positions() {
        // Every child gene either matches b at that index or comes from a
        // in relative order.
        let a = vec![0, 1, 2, 3, 4, 5, 6, 7];
        let b = vec![7, 6, 5, 4, 3, 2, 1, 0];
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let child = order_crossover(&a, &b, &mut rng);
            let from_a: Vec<usize> = child
                .iter()
                .enumerate()
                .filter(|&(i, &g)| b[i] != g)
                .map(|(_, &g)| g)
                .collect();
            let mut sorted = from_a.clone();
            sorted.sort_unstable();
            assert_eq!(from_a, sorted, "seed {seed}: {child:?}");
        }
    }

    #[test]
    fn test_order_crossover_empty() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(order_crossover(&[], &[], &mut rng).is_empty());
    }

    #[test]
    fn test_swap_mutation_changes_exactly_two_positions() {
        for seed in 0..100 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let original = shuffled(10, &mut rng);
            let mut genes = original.clone();
            swap_mutation(&mut genes, &mut rng);
            assert!(is_permutation(&genes, 10));
            let diff = genes.iter().zip(&original).filter(|(x, y)| x != y).count();
            assert_eq!(diff, 2);
        }
    }

    #[test]
    fn test_swap_mutation_short() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut one = vec![0];
        swap_mutation(&mut one, &mut rng);
        assert_eq!(one, vec![0]);

        let mut two = vec![0, 1];
        swap_mutation(&mut two, &mut rng);
        assert_eq!(two, vec![1, 0]);
    }

    #[test]
    fn test_insert_mutation_preserves_permutation() {
        for seed in 0..100 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut genes = shuffled(9, &mut rng);
            insert_mutation(&mut genes, &mut rng);
            assert!(is_permutation(&genes, 9));
        }
    }

    #[test]
    fn test_evaluate() {
        let p = TimetableProblem::from_records(
            TermGrid::default(),
            vec![
                TaskRecord::new("A", "1-2:2").with_seats(10),
                TaskRecord::new("B", "1-2:2").with_seats(100),
            ],
            vec![Classroom::new("R1", 50)],
            Vec::new(),
        );
        let constructor = GreedyConstructor::new(&p);
        let evaluator = FitnessEvaluator::new(&p);

        let mut ch = OrderingChromosome::new(vec![1, 0]);
        assert!(!ch.is_evaluated());
        ch.evaluate(&constructor, &evaluator);

        assert!(ch.is_evaluated());
        assert!(ch.is_permutation(2));
        assert_eq!(ch.schedule.placed_count(), 1);
        assert!((ch.fitness - 1.0).abs() < 1e-10);
        assert_eq!(ch.schedule.fitness, ch.fitness);
    }
}
