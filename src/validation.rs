//! Input validation for timetabling problems.
//!
//! Checks structural integrity of task, room, and preference records
//! before a run. Detects:
//! - Duplicate IDs
//! - Designated rooms that do not exist
//! - Tasks no room can ever host (capacity, designated room, room type)
//! - Unparseable week schedules and impossible durations
//! - Preferences for unknown tasks or days outside the week
//!
//! Problem construction tolerates all of these by skipping records; this
//! pass reports them up front so callers can reject bad input instead.

use std::collections::HashSet;

use crate::models::{Classroom, Task, TaskRecord, TermGrid, TimePreference};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two tasks or two rooms share the same ID.
    DuplicateId,
    /// A task designates a room that doesn't exist.
    InvalidRoomReference,
    /// No room satisfies a task's hard constraints.
    NoFeasibleRoom,
    /// A task's week schedule or duration cannot be used.
    InvalidWeekSchedule,
    /// A preference references a task that doesn't exist.
    InvalidPreferenceTask,
    /// A preference names a day outside the week.
    InvalidPreferenceDay,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input records of a timetabling run.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    grid: &TermGrid,
    tasks: &[TaskRecord],
    rooms: &[Classroom],
    preferences: &[TimePreference],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut room_ids = HashSet::new();
    for r in rooms {
        if !room_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room ID: {}", r.id),
            ));
        }
    }

    let mut task_ids = HashSet::new();
    for record in tasks {
        if !task_ids.insert(record.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", record.id),
            ));
        }

        if let Some(designated) = record.designated_room.as_deref().filter(|d| !d.is_empty()) {
            if !rooms.iter().any(|r| r.id == designated || r.name == designated) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidRoomReference,
                    format!(
                        "Task '{}' designates unknown room '{}'",
                        record.id, designated
                    ),
                ));
            }
        }

        match Task::from_record(record.clone(), grid) {
            Ok(task) => {
                if !rooms.iter().any(|r| task.accepts(r)) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::NoFeasibleRoom,
                        format!(
                            "No room can host task '{}' ({} seats)",
                            record.id, record.seats
                        ),
                    ));
                }
            }
            Err(e) => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWeekSchedule,
                format!("Task '{}': {e}", record.id),
            )),
        }
    }

    for pref in preferences {
        if !task_ids.contains(pref.task_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPreferenceTask,
                format!("Preference references unknown task '{}'", pref.task_id),
            ));
        }
        if pref.day == 0 || pref.day > grid.days_per_week {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPreferenceDay,
                format!(
                    "Preference for '{}' names day {} (expected 1-{})",
                    pref.task_id, pref.day, grid.days_per_week
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
