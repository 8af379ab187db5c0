//! Greedy constructor: task ordering → schedule.
//!
//! # Algorithm
//!
//! 1. Reset every room's occupancy.
//! 2. For each task in the given order, walk the rooms that satisfy its
//!    hard constraints (capacity, designated room, designated room type)
//!    in stable room-list order.
//! 3. Ask each candidate room to pack the task's weekly blocks across all
//!    of its active weeks. The first room that succeeds wins.
//! 4. If no candidate succeeds, record an unplaced assignment and move on.
//!
//! The procedure never backtracks across tasks, so the outcome depends on
//! the order. That order is what the GA searches over.
//!
//! # Complexity
//! O(n · r · d · s · w) where n = tasks, r = candidate rooms,
//! d = days/week, s = start offsets/day, w = active weeks.

use log::trace;

use crate::models::{Assignment, Occupancy, PackingMode, Schedule, TimetableProblem};

/// Deterministic greedy constructor for one problem.
///
/// Holds an immutable, cleared occupancy template. Each call to
/// [`construct`](Self::construct) clones it, so concurrent constructions
/// never share a live grid.
#[derive(Debug, Clone)]
pub struct GreedyConstructor<'a> {
    problem: &'a TimetableProblem,
    packing: PackingMode,
    candidates: Vec<Vec<usize>>,
    template: Vec<Occupancy>,
}

impl<'a> GreedyConstructor<'a> {
    /// Creates a constructor with strict packing.
    pub fn new(problem: &'a TimetableProblem) -> Self {
        let candidates = problem
            .tasks
            .iter()
            .map(|task| {
                problem
                    .rooms
                    .iter()
                    .enumerate()
                    .filter(|(_, room)| task.accepts(room))
                    .map(|(i, _)| i)
                    .collect()
            })
            .collect();

        Self {
            problem,
            packing: PackingMode::Strict,
            candidates,
            template: vec![Occupancy::new(problem.grid); problem.rooms.len()],
        }
    }

    /// Sets the packing mode.
    pub fn with_packing(mut self, packing: PackingMode) -> Self {
        self.packing = packing;
        self
    }

    /// Problem being constructed for.
    pub fn problem(&self) -> &'a TimetableProblem {
        self.problem
    }

    /// Rooms satisfying a task's hard constraints, in trial order.
    pub fn candidates(&self, task: usize) -> &[usize] {
        &self.candidates[task]
    }

    /// Fresh, cleared occupancy grids, one per room.
    pub fn fresh_occupancy(&self) -> Vec<Occupancy> {
        self.template.clone()
    }

    /// Builds a schedule from a task ordering on private grids.
    pub fn construct(&self, order: &[usize]) -> Schedule {
        let mut grids = self.fresh_occupancy();
        self.construct_into(&mut grids, order)
    }

    /// Builds a schedule on caller-owned grids, which are reset first.
    ///
    /// `grids` must hold one entry per room. On return they hold the
    /// occupancy of the constructed schedule.
    pub fn construct_into(&self, grids: &mut [Occupancy], order: &[usize]) -> Schedule {
        debug_assert_eq!(grids.len(), self.problem.rooms.len());
        for grid in grids.iter_mut() {
            grid.release_all();
        }

        let assignments = order
            .iter()
            .map(|&task_idx| self.place(grids, task_idx))
            .collect();

        Schedule::new(assignments)
    }

    fn place(&self, grids: &mut [Occupancy], task_idx: usize) -> Assignment {
        let task = &self.problem.tasks[task_idx];

        for &room_idx in &self.candidates[task_idx] {
            if let Some(slots) = grids[room_idx].try_pack_slots(
                task.weeks(),
                task.duration(),
                task.occurrences(),
                self.packing,
            ) {
                trace!(
                    "Placed '{}' in '{}' at {:?}",
                    task.id(),
                    self.problem.rooms[room_idx].id,
                    slots
                );
                return Assignment::placed(task_idx, room_idx, slots, task.weeks().to_vec());
            }
        }

        trace!("Could not place '{}'", task.id());
        Assignment::unplaced(task_idx, task.weeks().to_vec())
    }
}
