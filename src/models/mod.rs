//! Timetabling domain models.
//!
//! Provides the data types for one scheduling run: the term grid, the
//! task and classroom records with their scheduling views, the per-room
//! occupancy grid, and the assignment/schedule solution types.
//!
//! # Domain Mappings
//!
//! | u-timetable | Academic term |
//! |-------------|---------------|
//! | Task | Teaching class of a course section |
//! | Classroom | Physical room |
//! | Occupancy | Room booking grid for the term |
//! | Assignment | Room + weekly start slots for one task |
//! | Schedule | Full timetable candidate |

mod assignment;
mod classroom;
mod grid;
mod preference;
mod problem;
mod schedule;
mod task;

pub use assignment::{
    decode_slots, decode_weeks, encode_slots, encode_weeks, Assignment, AssignmentRecord,
    SlotSpan,
};
pub use classroom::{Classroom, Occupancy, OccupancyError, PackingMode};
pub use grid::TermGrid;
pub use preference::{Period, TimePreference};
pub use problem::{SkippedRecord, TimetableProblem};
pub use schedule::{Schedule, Violation, ViolationType};
pub use task::{parse_week_schedule, Task, TaskRecord, WeekBlock};
