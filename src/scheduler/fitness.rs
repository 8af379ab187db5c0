//! Schedule fitness.
//!
//! Fitness is a raw, non-normalized sum (higher = better):
//!
//! | Term | Contribution |
//! |------|--------------|
//! | Placement | `placement` weight per placed task |
//! | Teacher consistency | per teacher: `1 − distinct rooms / placements` |
//! | Class consistency | per class group: `1 − distinct rooms / placements` |
//! | Preference | `preference` weight per satisfied request |
//!
//! Every term is non-negative, so roulette selection over raw fitness
//! stays well defined. A request counts once when any of the task's
//! weekly blocks starts on the preferred day and half-day, no matter how
//! many blocks match.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::{Assignment, Schedule, Task, TimePreference, TimetableProblem};

/// Weights of the fitness terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessWeights {
    /// Score per placed task (default: 1.0).
    pub placement: f64,
    /// Multiplier on the per-teacher room consistency bonus (default: 1.0).
    pub teacher_consistency: f64,
    /// Multiplier on the per-class-group room consistency bonus (default: 1.0).
    pub class_consistency: f64,
    /// Score per satisfied time preference (default: 0.1).
    pub preference: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            placement: 1.0,
            teacher_consistency: 1.0,
            class_consistency: 1.0,
            preference: 0.1,
        }
    }
}

impl FitnessWeights {
    /// Placement only: fitness equals the number of placed tasks.
    pub fn placement_only() -> Self {
        Self {
            placement: 1.0,
            teacher_consistency: 0.0,
            class_consistency: 0.0,
            preference: 0.0,
        }
    }

    /// Clamps negative weights to zero.
    pub fn sanitized(self) -> Self {
        Self {
            placement: self.placement.max(0.0),
            teacher_consistency: self.teacher_consistency.max(0.0),
            class_consistency: self.class_consistency.max(0.0),
            preference: self.preference.max(0.0),
        }
    }
}

/// Per-term fitness of one schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FitnessBreakdown {
    /// Placed tasks.
    pub placed: usize,
    /// Unplaced tasks.
    pub unplaced: usize,
    /// Weighted placement term.
    pub placement: f64,
    /// Weighted teacher consistency term.
    pub teacher_consistency: f64,
    /// Weighted class-group consistency term.
    pub class_consistency: f64,
    /// Satisfied preference requests.
    pub satisfied_preferences: usize,
    /// Weighted preference term.
    pub preference: f64,
}

impl FitnessBreakdown {
    /// Sum of all weighted terms.
    pub fn total(&self) -> f64 {
        self.placement + self.teacher_consistency + self.class_consistency + self.preference
    }
}

/// Scores schedules of one problem.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator<'a> {
    problem: &'a TimetableProblem,
    weights: FitnessWeights,
    preferences: Vec<(usize, &'a TimePreference)>,
}

impl<'a> FitnessEvaluator<'a> {
    /// Creates an evaluator with default weights.
    pub fn new(problem: &'a TimetableProblem) -> Self {
        let preferences = problem
            .preferences
            .iter()
            .filter_map(|p| problem.task_index(&p.task_id).map(|idx| (idx, p)))
            .collect();

        Self {
            problem,
            weights: FitnessWeights::default(),
            preferences,
        }
    }

    /// Sets the weights. Negative weights are clamped to zero.
    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.weights = weights.sanitized();
        self
    }

    /// Active weights.
    pub fn weights(&self) -> &FitnessWeights {
        &self.weights
    }

    /// Computes every fitness term.
    pub fn breakdown(&self, schedule: &Schedule) -> FitnessBreakdown {
        let placed: Vec<&Assignment> = schedule
            .assignments
            .iter()
            .filter(|a| a.is_placed())
            .collect();

        let teacher = self.consistency(&placed, |t| t.record.teacher_id.as_str());
        let class = self.consistency(&placed, |t| t.record.class_group.as_str());
        let satisfied = self.satisfied_preferences(schedule);

        FitnessBreakdown {
            placed: placed.len(),
            unplaced: schedule.assignments.len() - placed.len(),
            placement: self.weights.placement * placed.len() as f64,
            teacher_consistency: self.weights.teacher_consistency * teacher,
            class_consistency: self.weights.class_consistency * class,
            satisfied_preferences: satisfied,
            preference: self.weights.preference * satisfied as f64,
        }
    }

    /// Total fitness.
    pub fn evaluate(&self, schedule: &Schedule) -> f64 {
        self.breakdown(schedule).total()
    }

    /// Computes and stores the fitness on the schedule.
    pub fn score(&self, schedule: &mut Schedule) -> f64 {
        schedule.fitness = self.evaluate(schedule);
        schedule.fitness
    }

    /// Sum over groups of `1 − distinct rooms / placements`.
    ///
    /// Tasks with an empty group key are not grouped.
    fn consistency<F>(&self, placed: &[&Assignment], key: F) -> f64
    where
        F: Fn(&Task) -> &str,
    {
        let mut groups: HashMap<&str, (usize, HashSet<usize>)> = HashMap::new();
        for a in placed {
            let k = key(&self.problem.tasks[a.task]);
            if k.is_empty() {
                continue;
            }
            let Some(room) = a.room else { continue };
            let entry = groups.entry(k).or_default();
            entry.0 += 1;
            entry.1.insert(room);
        }

        groups
            .values()
            .map(|(total, rooms)| 1.0 - rooms.len() as f64 / *total as f64)
            .sum()
    }

    fn satisfied_preferences(&self, schedule: &Schedule) -> usize {
        if self.preferences.is_empty() {
            return 0;
        }

        let mut by_task: Vec<Option<&Assignment>> = vec![None; self.problem.tasks.len()];
        for a in &schedule.assignments {
            if let Some(slot) = by_task.get_mut(a.task) {
                *slot = Some(a);
            }
        }

        let grid = &self.problem.grid;
        self.preferences
            .iter()
            .filter(|(task, pref)| {
                by_task[*task].is_some_and(|a| {
                    a.is_placed() && a.slots.iter().any(|&s| pref.matches_start(s, grid))
                })
            })
            .count()
    }
}
