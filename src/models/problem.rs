//! One scheduling run's input.
//!
//! Built once from directory records and then shared read-only by the
//! greedy constructor, the fitness evaluator, and the GA driver.
//!
//! # Malformed records
//! A task record whose week schedule or slot fields cannot be turned
//! into a [`Task`] is skipped, logged, and listed in
//! [`TimetableProblem::skipped`]. The same applies to repeated task ids
//! (first occurrence wins) and to preferences naming an unknown task or
//! an out-of-range day. The search itself never sees unparsed data.

use std::collections::HashMap;

use log::warn;

use super::{Classroom, Task, TaskRecord, TermGrid, TimePreference};

/// A record left out of the run and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Task id of the record.
    pub task_id: String,
    /// Reason it was skipped.
    pub reason: String,
}

/// Input of one scheduling run.
#[derive(Debug, Clone)]
pub struct TimetableProblem {
    /// Term geometry.
    pub grid: TermGrid,
    /// Tasks, in directory order.
    pub tasks: Vec<Task>,
    /// Rooms, in directory order (also the candidate trial order).
    pub rooms: Vec<Classroom>,
    /// Preferences that refer to known tasks and valid days.
    pub preferences: Vec<TimePreference>,
    /// Task records and preferences left out of the run.
    pub skipped: Vec<SkippedRecord>,
    task_index: HashMap<String, usize>,
}

impl TimetableProblem {
    /// Builds a problem from directory records.
    pub fn from_records(
        grid: TermGrid,
        task_records: Vec<TaskRecord>,
        rooms: Vec<Classroom>,
        preferences: Vec<TimePreference>,
    ) -> Self {
        let mut tasks = Vec::with_capacity(task_records.len());
        let mut task_index = HashMap::with_capacity(task_records.len());
        let mut skipped = Vec::new();

        for record in task_records {
            if task_index.contains_key(&record.id) {
                warn!("Skipping task '{}': duplicate id", record.id);
                skipped.push(SkippedRecord {
                    task_id: record.id,
                    reason: "duplicate task id".into(),
                });
                continue;
            }

            let id = record.id.clone();
            match Task::from_record(record, &grid) {
                Ok(task) => {
                    task_index.insert(id, tasks.len());
                    tasks.push(task);
                }
                Err(e) => {
                    warn!("Skipping task '{id}': {e}");
                    skipped.push(SkippedRecord {
                        task_id: id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let mut kept_preferences = Vec::with_capacity(preferences.len());
        for pref in preferences {
            let reason = if !task_index.contains_key(&pref.task_id) {
                Some("preference for unknown task".to_string())
            } else if pref.day == 0 || pref.day > grid.days_per_week {
                Some(format!("preference day {} out of range", pref.day))
            } else {
                None
            };

            match reason {
                Some(reason) => {
                    warn!("Skipping preference for '{}': {reason}", pref.task_id);
                    skipped.push(SkippedRecord {
                        task_id: pref.task_id,
                        reason,
                    });
                }
                None => kept_preferences.push(pref),
            }
        }

        Self {
            grid,
            tasks,
            rooms,
            preferences: kept_preferences,
            skipped,
            task_index,
        }
    }

    /// Builds a problem from already constructed tasks.
    pub fn new(grid: TermGrid, tasks: Vec<Task>, rooms: Vec<Classroom>) -> Self {
        let task_index = tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id().to_string(), i))
            .collect();
        Self {
            grid,
            tasks,
            rooms,
            preferences: Vec::new(),
            skipped: Vec::new(),
            task_index,
        }
    }

    /// Adds preferences, dropping those for unknown tasks.
    pub fn with_preferences(mut self, preferences: Vec<TimePreference>) -> Self {
        self.preferences = preferences
            .into_iter()
            .filter(|p| self.task_index.contains_key(&p.task_id))
            .collect();
        self
    }

    /// Index of a task id.
    pub fn task_index(&self, task_id: &str) -> Option<usize> {
        self.task_index.get(task_id).copied()
    }

    /// Index of a room id.
    pub fn room_index(&self, room_id: &str) -> Option<usize> {
        self.rooms.iter().position(|r| r.id == room_id)
    }

    /// Number of tasks.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}
