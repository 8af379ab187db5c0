//! Term grid geometry.
//!
//! The term is a three-level grid: weeks × days × slots. A **weekly slot**
//! index addresses one (day, slot) cell inside a week and runs from
//! `0` to `slots_per_week() - 1`. A **cell** index addresses one
//! (week, day, slot) cell in the whole term.
//!
//! ```text
//! weekly_slot = day * slots_per_day + offset
//! cell        = week * slots_per_week + weekly_slot
//! ```
//!
//! All indices are 0-based internally. Persisted records use 1-based
//! day, slot and week numbers (see [`AssignmentRecord`](super::AssignmentRecord)).

use serde::{Deserialize, Serialize};

/// Dimensions of the teaching term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermGrid {
    /// Teaching slots in one day (default: 8).
    pub slots_per_day: usize,
    /// Teaching days in one week (default: 5).
    pub days_per_week: usize,
    /// Weeks in one term (default: 20).
    pub weeks_per_term: usize,
}

impl Default for TermGrid {
    fn default() -> Self {
        Self {
            slots_per_day: 8,
            days_per_week: 5,
            weeks_per_term: 20,
        }
    }
}

impl TermGrid {
    /// Creates a grid with explicit dimensions.
    pub fn new(slots_per_day: usize, days_per_week: usize, weeks_per_term: usize) -> Self {
        Self {
            slots_per_day,
            days_per_week,
            weeks_per_term,
        }
    }

    /// Slots in one week.
    #[inline]
    pub fn slots_per_week(&self) -> usize {
        self.slots_per_day * self.days_per_week
    }

    /// Total cells in the term.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.slots_per_week() * self.weeks_per_term
    }

    /// Cell index for a (week, weekly slot) pair.
    #[inline]
    pub fn cell(&self, week: usize, weekly_slot: usize) -> usize {
        week * self.slots_per_week() + weekly_slot
    }

    /// Weekly slot for a (day, offset-within-day) pair.
    #[inline]
    pub fn weekly_slot(&self, day: usize, offset: usize) -> usize {
        day * self.slots_per_day + offset
    }

    /// Day (0-based) of a weekly slot.
    #[inline]
    pub fn day_of(&self, weekly_slot: usize) -> usize {
        weekly_slot / self.slots_per_day
    }

    /// Offset within its day of a weekly slot.
    #[inline]
    pub fn offset_of(&self, weekly_slot: usize) -> usize {
        weekly_slot % self.slots_per_day
    }

    /// Whether a block of `duration` slots starting at `weekly_slot`
    /// stays inside one day.
    #[inline]
    pub fn fits_in_day(&self, weekly_slot: usize, duration: usize) -> bool {
        self.offset_of(weekly_slot) + duration <= self.slots_per_day
    }

    /// Whether an in-day offset falls in the morning half.
    ///
    /// Morning is the first `slots_per_day / 2` slots (0–3 on the default grid).
    #[inline]
    pub fn is_morning(&self, offset: usize) -> bool {
        offset < self.slots_per_day / 2
    }

    /// Whether a week index lies inside the term.
    #[inline]
    pub fn contains_week(&self, week: usize) -> bool {
        week < self.weeks_per_term
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions() {
        let g = TermGrid::default();
        assert_eq!(g.slots_per_week(), 40);
        assert_eq!(g.cell_count(), 800);
    }

    #[test]
    fn test_slot_arithmetic() {
        let g = TermGrid::default();
        let s = g.weekly_slot(2, 5);
        assert_eq!(s, 21);
        assert_eq!(g.day_of(s), 2);
        assert_eq!(g.offset_of(s), 5);
        assert_eq!(g.cell(3, s), 3 * 40 + 21);
    }

    #[test]
    fn test_fits_in_day() {
        let g = TermGrid::default();
        assert!(g.fits_in_day(g.weekly_slot(0, 6), 2));
        assert!(!g.fits_in_day(g.weekly_slot(0, 7), 2));
        assert!(g.fits_in_day(g.weekly_slot(4, 0), 8));
    }

    #[test]
    fn test_morning_split() {
        let g = TermGrid::default();
        assert!(g.is_morning(0));
        assert!(g.is_morning(3));
        assert!(!g.is_morning(4));
        assert!(!g.is_morning(7));
    }

    #[test]
    fn test_deserialize_partial() {
        let g: TermGrid = serde_json::from_str(r#"{"weeks_per_term": 16}"#).unwrap();
        assert_eq!(g.weeks_per_term, 16);
        assert_eq!(g.slots_per_day, 8);
    }
}
