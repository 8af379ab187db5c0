//! Classroom and term occupancy model.
//!
//! A [`Classroom`] is the plain room record. [`Occupancy`] is the mutable
//! per-room boolean grid over the whole term that the greedy constructor
//! packs tasks into. The two are kept apart so that one immutable room
//! list can back any number of independent occupancy views (one per
//! evaluation, one per worker thread).
//!
//! # Invariant
//! A cell is `true` iff a committed placement occupies that room at
//! that exact (week, day, slot).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TermGrid;

/// A physical room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classroom {
    /// Unique room identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Seating capacity.
    pub capacity: usize,
    /// Room type (e.g. "lecture", "lab").
    #[serde(default)]
    pub room_type: String,
}

impl Classroom {
    /// Creates a room with the given id and capacity.
    pub fn new(id: impl Into<String>, capacity: usize) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            capacity,
            room_type: String::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the room type.
    pub fn with_room_type(mut self, room_type: impl Into<String>) -> Self {
        self.room_type = room_type.into();
        self
    }
}

/// What `try_pack_slots` leaves behind when it cannot collect enough days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackingMode {
    /// Release every range committed during the failed attempt.
    #[default]
    Strict,
    /// Leave already committed days occupied.
    PartialCommit,
}

/// Rejected occupancy update.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OccupancyError {
    #[error("Cell at week {week}, slot {slot} is already occupied")]
    Occupied { week: usize, slot: usize },

    #[error("Range week {week}, slots {start}-{end} lies outside the term grid")]
    OutOfRange {
        week: usize,
        start: usize,
        end: usize,
    },
}

/// Boolean occupancy grid of one room over the whole term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    grid: TermGrid,
    cells: Vec<bool>,
}

impl Occupancy {
    /// Creates an empty grid.
    pub fn new(grid: TermGrid) -> Self {
        Self {
            grid,
            cells: vec![false; grid.cell_count()],
        }
    }

    /// Grid geometry.
    #[inline]
    pub fn grid(&self) -> &TermGrid {
        &self.grid
    }

    /// Whether one (week, weekly slot) cell is occupied.
    ///
    /// Cells outside the term read as occupied.
    pub fn is_occupied(&self, week: usize, weekly_slot: usize) -> bool {
        if !self.in_range(week, weekly_slot, weekly_slot) {
            return true;
        }
        self.cells[self.grid.cell(week, weekly_slot)]
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Whether every slot in `[start, end]` is free in every listed week.
    ///
    /// Ranges outside the term are never free.
    pub fn is_range_free(&self, weeks: &[usize], start: usize, end: usize) -> bool {
        weeks.iter().all(|&week| {
            self.in_range(week, start, end)
                && (start..=end).all(|slot| !self.cells[self.grid.cell(week, slot)])
        })
    }

    /// Marks every (week, slot) in the cross product occupied.
    ///
    /// Rejects the whole update, leaving the grid untouched, if any
    /// target cell is already occupied or out of range.
    pub fn occupy_range(
        &mut self,
        weeks: &[usize],
        start: usize,
        end: usize,
    ) -> Result<(), OccupancyError> {
        for &week in weeks {
            if !self.in_range(week, start, end) {
                return Err(OccupancyError::OutOfRange { week, start, end });
            }
            if let Some(slot) = (start..=end).find(|&s| self.cells[self.grid.cell(week, s)]) {
                return Err(OccupancyError::Occupied { week, slot });
            }
        }

        for &week in weeks {
            for slot in start..=end {
                let cell = self.grid.cell(week, slot);
                self.cells[cell] = true;
            }
        }
        Ok(())
    }

    /// Clears every (week, slot) in the cross product. Out-of-range
    /// weeks are ignored.
    pub fn release_range(&mut self, weeks: &[usize], start: usize, end: usize) {
        for &week in weeks {
            if !self.in_range(week, start, end) {
                continue;
            }
            for slot in start..=end {
                let cell = self.grid.cell(week, slot);
                self.cells[cell] = false;
            }
        }
    }

    /// Clears the whole grid.
    pub fn release_all(&mut self) {
        self.cells.fill(false);
    }

    /// Greedy multi-day placement search.
    ///
    /// Walks days in order and, within each day, start offsets in order.
    /// The first start whose `[start, start + duration - 1]` range is free
    /// in **all** `weeks` is committed, and the search moves to the next
    /// day: at most one block per day. Stops once `occurrences` starts
    /// are collected.
    ///
    /// Returns the committed weekly start slots, or `None` if fewer than
    /// `occurrences` days could be filled. On failure, `mode` decides
    /// whether the partial commits are rolled back.
    pub fn try_pack_slots(
        &mut self,
        weeks: &[usize],
        duration: usize,
        occurrences: usize,
        mode: PackingMode,
    ) -> Option<Vec<usize>> {
        if duration == 0 || duration > self.grid.slots_per_day || occurrences == 0 {
            return None;
        }

        let mut starts = Vec::with_capacity(occurrences);

        for day in 0..self.grid.days_per_week {
            if starts.len() == occurrences {
                break;
            }
            for offset in 0..=(self.grid.slots_per_day - duration) {
                let start = self.grid.weekly_slot(day, offset);
                let end = start + duration - 1;
                if self.is_range_free(weeks, start, end)
                    && self.occupy_range(weeks, start, end).is_ok()
                {
                    starts.push(start);
                    break;
                }
            }
        }

        if starts.len() == occurrences {
            return Some(starts);
        }

        if mode == PackingMode::Strict {
            for &start in &starts {
                self.release_range(weeks, start, start + duration - 1);
            }
        }
        None
    }

    fn in_range(&self, week: usize, start: usize, end: usize) -> bool {
        self.grid.contains_week(week) && start <= end && end < self.grid.slots_per_week()
    }
}
