//! Teaching task model.
//!
//! A [`TaskRecord`] is the raw shape supplied by the data directory.
//! A [`Task`] is the scheduling view built from it once per run: the
//! record plus the derived week list, block duration, and weekly
//! occurrence count. Tasks are immutable for the rest of the run.
//!
//! # Week schedule encoding
//!
//! ```text
//! start-end:hoursPerWeek[,start-end:hoursPerWeek...]
//! ```
//!
//! Week numbers are 1-based and inclusive, e.g. `1-8:4,10-16:2`.

use serde::{Deserialize, Serialize};

use super::{Classroom, TermGrid};
use crate::error::ParseError;

/// A teaching obligation as stored by the data directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Stable task identifier (teaching-class id).
    pub id: String,
    /// Course identifier.
    #[serde(default)]
    pub course_id: String,
    /// Course display name.
    #[serde(default)]
    pub course_name: String,
    /// Teacher employee id (empty = none, excluded from consistency scoring).
    #[serde(default)]
    pub teacher_id: String,
    /// Teaching-class composition key (empty = none).
    #[serde(default)]
    pub class_group: String,
    /// Required seats.
    #[serde(default)]
    pub seats: usize,
    /// Designated room id or name. `None` or empty = unconstrained.
    #[serde(default)]
    pub designated_room: Option<String>,
    /// Designated room type. `None` or empty = unconstrained.
    #[serde(default)]
    pub designated_room_type: Option<String>,
    /// Consecutive slots per block. `None` or 0 = whole weekly allotment.
    #[serde(default)]
    pub duration: Option<usize>,
    /// Week schedule string (`start-end:hours,...`). Missing = empty,
    /// which fails parsing and skips the record.
    #[serde(default)]
    pub week_schedule: String,
    /// Scheduling priority. Lower groups are ordered first in the
    /// initial population.
    #[serde(default)]
    pub priority: i32,
}

impl TaskRecord {
    /// Creates a record with the given id and week schedule.
    pub fn new(id: impl Into<String>, week_schedule: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            course_id: String::new(),
            course_name: String::new(),
            teacher_id: String::new(),
            class_group: String::new(),
            seats: 0,
            designated_room: None,
            designated_room_type: None,
            duration: None,
            week_schedule: week_schedule.into(),
            priority: 0,
        }
    }

    /// Sets the course id and name.
    pub fn with_course(mut self, course_id: impl Into<String>, name: impl Into<String>) -> Self {
        self.course_id = course_id.into();
        self.course_name = name.into();
        self
    }

    /// Sets the teacher.
    pub fn with_teacher(mut self, teacher_id: impl Into<String>) -> Self {
        self.teacher_id = teacher_id.into();
        self
    }

    /// Sets the class-group key.
    pub fn with_class_group(mut self, class_group: impl Into<String>) -> Self {
        self.class_group = class_group.into();
        self
    }

    /// Sets the required seats.
    pub fn with_seats(mut self, seats: usize) -> Self {
        self.seats = seats;
        self
    }

    /// Sets the designated room (id or name).
    pub fn with_designated_room(mut self, room: impl Into<String>) -> Self {
        self.designated_room = Some(room.into());
        self
    }

    /// Sets the designated room type.
    pub fn with_designated_room_type(mut self, room_type: impl Into<String>) -> Self {
        self.designated_room_type = Some(room_type.into());
        self
    }

    /// Sets the block duration in slots.
    pub fn with_duration(mut self, duration: usize) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// One `start-end:hours` block, with 0-based inclusive weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekBlock {
    /// First week (0-based).
    pub start_week: usize,
    /// Last week (0-based, inclusive).
    pub end_week: usize,
    /// Teaching hours (slots) required per week in this block.
    pub hours_per_week: usize,
}

impl WeekBlock {
    /// Iterates the block's weeks.
    pub fn weeks(&self) -> impl Iterator<Item = usize> {
        self.start_week..=self.end_week
    }
}

/// Parses a week schedule string into blocks.
///
/// Rejects empty strings, malformed entries, zero or reversed week
/// numbers, and weeks beyond the term.
pub fn parse_week_schedule(schedule: &str, grid: &TermGrid) -> Result<Vec<WeekBlock>, ParseError> {
    let schedule = schedule.trim();
    if schedule.is_empty() {
        return Err(ParseError::EmptyWeekSchedule);
    }

    schedule
        .split(',')
        .map(|part| parse_week_block(part.trim(), grid))
        .collect()
}

fn parse_week_block(part: &str, grid: &TermGrid) -> Result<WeekBlock, ParseError> {
    let malformed = || ParseError::MalformedWeekBlock(part.to_string());

    let (range, hours) = part.split_once(':').ok_or_else(malformed)?;
    let (start, end) = range.split_once('-').ok_or_else(malformed)?;
    let start: usize = start.trim().parse().map_err(|_| malformed())?;
    let end: usize = end.trim().parse().map_err(|_| malformed())?;
    let hours: usize = hours.trim().parse().map_err(|_| malformed())?;

    if start == 0 || end < start || end > grid.weeks_per_term {
        return Err(ParseError::WeekOutOfRange {
            start,
            end,
            weeks: grid.weeks_per_term,
        });
    }

    Ok(WeekBlock {
        start_week: start - 1,
        end_week: end - 1,
        hours_per_week: hours,
    })
}

/// Scheduling view of a task.
///
/// # Derived fields
/// - `weeks`: sorted union of every block's weeks (0-based).
/// - `hours_per_week`: the largest weekly load across blocks; the
///   reservation holds for the whole week set.
/// - `duration`: the record's duration, or `hours_per_week` when unset/0.
/// - `occurrences`: `hours_per_week / duration` blocks per week.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// Source record.
    pub record: TaskRecord,
    /// Parsed week blocks.
    pub week_blocks: Vec<WeekBlock>,
    weeks: Vec<usize>,
    hours_per_week: usize,
    duration: usize,
    occurrences: usize,
}

impl Task {
    /// Builds the scheduling view of a record.
    pub fn from_record(record: TaskRecord, grid: &TermGrid) -> Result<Self, ParseError> {
        let week_blocks = parse_week_schedule(&record.week_schedule, grid)?;

        let mut weeks: Vec<usize> = week_blocks.iter().flat_map(WeekBlock::weeks).collect();
        weeks.sort_unstable();
        weeks.dedup();

        let hours_per_week = week_blocks
            .iter()
            .map(|b| b.hours_per_week)
            .max()
            .unwrap_or(0);
        if hours_per_week == 0 {
            return Err(ParseError::ZeroHours { task_id: record.id });
        }

        let duration = match record.duration {
            Some(d) if d > 0 => d,
            _ => hours_per_week,
        };
        if duration > grid.slots_per_day {
            return Err(ParseError::DurationTooLong {
                task_id: record.id,
                duration,
                slots_per_day: grid.slots_per_day,
            });
        }

        let occurrences = hours_per_week / duration;
        if occurrences == 0 {
            return Err(ParseError::NoWeeklyOccurrence {
                task_id: record.id,
                hours: hours_per_week,
                duration,
            });
        }

        Ok(Self {
            record,
            week_blocks,
            weeks,
            hours_per_week,
            duration,
            occurrences,
        })
    }

    /// Task id.
    #[inline]
    pub fn id(&self) -> &str {
        &self.record.id
    }

    /// Active weeks (0-based, sorted).
    #[inline]
    pub fn weeks(&self) -> &[usize] {
        &self.weeks
    }

    /// Slots per contiguous block.
    #[inline]
    pub fn duration(&self) -> usize {
        self.duration
    }

    /// Weekly teaching hours.
    #[inline]
    pub fn hours_per_week(&self) -> usize {
        self.hours_per_week
    }

    /// Blocks required per week.
    #[inline]
    pub fn occurrences(&self) -> usize {
        self.occurrences
    }

    /// Scheduling priority.
    #[inline]
    pub fn priority(&self) -> i32 {
        self.record.priority
    }

    /// Whether a room satisfies this task's hard constraints:
    /// capacity, designated room, designated room type.
    pub fn accepts(&self, room: &Classroom) -> bool {
        if room.capacity < self.record.seats {
            return false;
        }

        if let Some(designated) = non_empty(&self.record.designated_room) {
            if designated != room.id && designated != room.name {
                return false;
            }
        }

        if let Some(room_type) = non_empty(&self.record.designated_room_type) {
            if room_type != room.room_type {
                return false;
            }
        }

        true
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
