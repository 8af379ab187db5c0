//! Schedule (solution) model.
//!
//! A schedule is the list of assignments produced by greedily
//! constructing from one task ordering, together with its fitness.
//! Violations are reported by the diagnostic conflict check over
//! persisted records.

use serde::{Deserialize, Serialize};

use super::Assignment;

/// One constructed timetable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    /// One assignment per task, in construction order.
    pub assignments: Vec<Assignment>,
    /// Scalar fitness (higher = better).
    pub fitness: f64,
}

/// A problem found in a stored schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Teaching-class (task) id of the offending record.
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
    /// Severity (0-100, higher = worse).
    pub severity: i32,
}

/// Classification of violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Two records occupy the same room cell.
    DoubleBooking,
    /// Record references a room that does not exist.
    UnknownClassroom,
    /// Record references a task that does not exist.
    UnknownTask,
    /// A block crosses from one day into the next.
    DayBoundary,
    /// Slot or week string could not be decoded.
    MalformedRecord,
}

impl Violation {
    /// Creates a double-booking violation.
    pub fn double_booking(task_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::DoubleBooking,
            entity_id: task_id.into(),
            message: message.into(),
            severity: 90,
        }
    }

    /// Creates an unknown-classroom violation.
    pub fn unknown_classroom(task_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::UnknownClassroom,
            entity_id: task_id.into(),
            message: message.into(),
            severity: 70,
        }
    }

    /// Creates an unknown-task violation.
    pub fn unknown_task(task_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::UnknownTask,
            entity_id: task_id.into(),
            message: message.into(),
            severity: 50,
        }
    }

    /// Creates a day-boundary violation.
    pub fn day_boundary(task_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::DayBoundary,
            entity_id: task_id.into(),
            message: message.into(),
            severity: 80,
        }
    }

    /// Creates a malformed-record violation.
    pub fn malformed(task_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::MalformedRecord,
            entity_id: task_id.into(),
            message: message.into(),
            severity: 60,
        }
    }
}

impl Schedule {
    /// Creates an unscored schedule.
    pub fn new(assignments: Vec<Assignment>) -> Self {
        Self {
            assignments,
            fitness: 0.0,
        }
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Number of placed tasks.
    pub fn placed_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.is_placed()).count()
    }

    /// Unplaced assignments.
    pub fn unplaced(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter().filter(|a| !a.is_placed())
    }

    /// Whether every task was placed.
    pub fn is_complete(&self) -> bool {
        self.assignments.iter().all(Assignment::is_placed)
    }

    /// Assignment for a task index.
    pub fn assignment_for_task(&self, task: usize) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.task == task)
    }

    /// Placed assignments in a room.
    pub fn assignments_for_room(&self, room: usize) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.room == Some(room) && a.is_placed())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schedule() -> Schedule {
        Schedule::new(vec![
            Assignment::placed(0, 0, vec![0], vec![0]),
            Assignment::unplaced(1, vec![0]),
            Assignment::placed(2, 0, vec![8, 16], vec![0, 1]),
            Assignment::placed(3, 1, vec![0], vec![0]),
        ])
    }

    #[test]
    fn test_counts() {
        let s = sample_schedule();
        assert_eq!(s.assignment_count(), 4);
        assert_eq!(s.placed_count(), 3);
        assert_eq!(s.unplaced().count(), 1);
        assert!(!s.is_complete());
    }

    #[test]
    fn test_lookups() {
        let s = sample_schedule();
        assert_eq!(s.assignment_for_task(2).unwrap().slots, vec![8, 16]);
        assert!(s.assignment_for_task(9).is_none());
        assert_eq!(s.assignments_for_room(0).len(), 2);
        assert_eq!(s.assignments_for_room(1).len(), 1);
    }

    #[test]
    fn test_empty_schedule() {
        let s = Schedule::default();
        assert_eq!(s.placed_count(), 0);
        assert!(s.is_complete());
        assert_eq!(s.fitness, 0.0);
    }

    #[test]
    fn test_violation_factories() {
        let v = Violation::double_booking("TC1", "Room R1 week 1 slot 1");
        assert_eq!(v.violation_type, ViolationType::DoubleBooking);
        assert_eq!(v.entity_id, "TC1");

        assert_eq!(
            Violation::unknown_classroom("TC1", "").violation_type,
            ViolationType::UnknownClassroom
        );
        assert_eq!(
            Violation::unknown_task("TC1", "").violation_type,
            ViolationType::UnknownTask
        );
        assert_eq!(
            Violation::day_boundary("TC1", "").violation_type,
            ViolationType::DayBoundary
        );
        assert_eq!(
            Violation::malformed("TC1", "").violation_type,
            ViolationType::MalformedRecord
        );
    }
}
