//! Error types.
//!
//! Unplaceable tasks are not errors: they surface as unplaced
//! [`Assignment`](crate::models::Assignment)s and cost fitness.

use thiserror::Error;

/// Failure to parse an external encoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed week block '{0}': expected 'start-end:hours'")]
    MalformedWeekBlock(String),

    #[error("Week range {start}-{end} is invalid for a {weeks}-week term")]
    WeekOutOfRange { start: usize, end: usize, weeks: usize },

    #[error("Empty week schedule")]
    EmptyWeekSchedule,

    #[error("Task '{task_id}' requires zero hours per week")]
    ZeroHours { task_id: String },

    #[error("Task '{task_id}' duration {duration} exceeds {slots_per_day} slots per day")]
    DurationTooLong {
        task_id: String,
        duration: usize,
        slots_per_day: usize,
    },

    #[error("Task '{task_id}' has {hours} hours per week, fewer than one block of {duration}")]
    NoWeeklyOccurrence {
        task_id: String,
        hours: usize,
        duration: usize,
    },

    #[error("Malformed slot entry '{0}': expected 'day:start-end'")]
    MalformedSlot(String),

    #[error("Slot entry '{0}' lies outside the term grid")]
    SlotOutOfRange(String),

    #[error("Malformed week list entry '{0}'")]
    MalformedWeek(String),
}

/// Failure of the assignment store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level error for end-to-end runs.
#[derive(Debug, Error)]
pub enum TimetableError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
