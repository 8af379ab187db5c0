//! Task-to-room-and-time bindings and their persisted encoding.
//!
//! # Persisted encoding
//!
//! | Field | Format | Example |
//! |-------|--------|---------|
//! | `slot` | `day:start-end[,day:start-end...]` (1-based) | `2:1-2,4:5-6` |
//! | `weeks` | `w1,w2,...` (1-based) | `1,2,3,4` |
//!
//! Decoding uses the same [`TermGrid`] arithmetic as the packer, so a
//! stored schedule re-checked against fresh occupancy grids reports no
//! false conflicts.

use serde::{Deserialize, Serialize};

use super::{Classroom, Task, TermGrid};
use crate::error::ParseError;

/// One realized binding of a task to a room and weekly start slots.
///
/// `room == None` or empty `slots` means the task could not be placed;
/// that is a valid terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Index into the problem's task list.
    pub task: usize,
    /// Index into the problem's room list.
    pub room: Option<usize>,
    /// Weekly start slots, one per weekly occurrence.
    pub slots: Vec<usize>,
    /// Active weeks (0-based), copied from the task.
    pub weeks: Vec<usize>,
}

impl Assignment {
    /// Creates a placed assignment.
    pub fn placed(task: usize, room: usize, slots: Vec<usize>, weeks: Vec<usize>) -> Self {
        Self {
            task,
            room: Some(room),
            slots,
            weeks,
        }
    }

    /// Creates an unplaced assignment.
    pub fn unplaced(task: usize, weeks: Vec<usize>) -> Self {
        Self {
            task,
            room: None,
            slots: Vec::new(),
            weeks,
        }
    }

    /// Whether the task received a room and at least one slot.
    #[inline]
    pub fn is_placed(&self) -> bool {
        self.room.is_some() && !self.slots.is_empty()
    }

    /// Whether no block spans a day boundary.
    pub fn respects_day_boundaries(&self, duration: usize, grid: &TermGrid) -> bool {
        self.slots.iter().all(|&s| grid.fits_in_day(s, duration))
    }
}

/// A contiguous block decoded from a slot string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpan {
    /// Weekly start slot (0-based).
    pub start: usize,
    /// Block length in slots.
    pub length: usize,
}

impl SlotSpan {
    /// Last weekly slot of the block.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.length - 1
    }
}

/// Assignment in the shape the external store keeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Course id.
    pub course_id: String,
    /// Course name.
    #[serde(default)]
    pub course_name: String,
    /// Teaching-class (task) id.
    pub teaching_class_id: String,
    /// Room id; `None` for an unplaced task.
    #[serde(default)]
    pub classroom_id: Option<String>,
    /// Room name; `None` for an unplaced task.
    #[serde(default)]
    pub classroom_name: Option<String>,
    /// Encoded slots (`day:start-end,...`), empty for an unplaced task.
    #[serde(default)]
    pub slot: String,
    /// Encoded weeks (`w1,w2,...`).
    #[serde(default)]
    pub weeks: String,
}

impl AssignmentRecord {
    /// Encodes an assignment of `task` to `room`.
    pub fn from_assignment(
        assignment: &Assignment,
        task: &Task,
        room: Option<&Classroom>,
        grid: &TermGrid,
    ) -> Self {
        let placed = assignment.is_placed();
        Self {
            course_id: task.record.course_id.clone(),
            course_name: task.record.course_name.clone(),
            teaching_class_id: task.id().to_string(),
            classroom_id: room.filter(|_| placed).map(|r| r.id.clone()),
            classroom_name: room.filter(|_| placed).map(|r| r.name.clone()),
            slot: if placed {
                encode_slots(&assignment.slots, task.duration(), grid)
            } else {
                String::new()
            },
            weeks: encode_weeks(&assignment.weeks),
        }
    }

    /// Whether this record carries a room and slots.
    pub fn is_placed(&self) -> bool {
        self.classroom_id.as_deref().is_some_and(|id| !id.is_empty())
            && !self.slot.trim().is_empty()
    }
}

/// Encodes weekly start slots as `day:start-end,...` with 1-based numbers.
pub fn encode_slots(slots: &[usize], duration: usize, grid: &TermGrid) -> String {
    slots
        .iter()
        .map(|&s| {
            let day = grid.day_of(s) + 1;
            let start = grid.offset_of(s) + 1;
            let end = start + duration - 1;
            format!("{day}:{start}-{end}")
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Decodes a `day:start-end,...` slot string.
///
/// An empty string decodes to no spans.
pub fn decode_slots(encoded: &str, grid: &TermGrid) -> Result<Vec<SlotSpan>, ParseError> {
    if encoded.trim().is_empty() {
        return Ok(Vec::new());
    }

    encoded
        .split(',')
        .map(|part| {
            let part = part.trim();
            let malformed = || ParseError::MalformedSlot(part.to_string());

            let (day, range) = part.split_once(':').ok_or_else(malformed)?;
            let (start, end) = range.split_once('-').ok_or_else(malformed)?;
            let day: usize = day.trim().parse().map_err(|_| malformed())?;
            let start: usize = start.trim().parse().map_err(|_| malformed())?;
            let end: usize = end.trim().parse().map_err(|_| malformed())?;

            if day == 0
                || day > grid.days_per_week
                || start == 0
                || end < start
                || end > grid.slots_per_day
            {
                return Err(ParseError::SlotOutOfRange(part.to_string()));
            }

            Ok(SlotSpan {
                start: grid.weekly_slot(day - 1, start - 1),
                length: end - start + 1,
            })
        })
        .collect()
}

/// Encodes 0-based weeks as a 1-based `w1,w2,...` list.
pub fn encode_weeks(weeks: &[usize]) -> String {
    weeks
        .iter()
        .map(|w| (w + 1).to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Decodes a 1-based `w1,w2,...` list into 0-based weeks.
pub fn decode_weeks(encoded: &str, grid: &TermGrid) -> Result<Vec<usize>, ParseError> {
    if encoded.trim().is_empty() {
        return Ok(Vec::new());
    }

    encoded
        .split(',')
        .map(|part| {
            let part = part.trim();
            let week: usize = part
                .parse()
                .map_err(|_| ParseError::MalformedWeek(part.to_string()))?;
            if week == 0 || week > grid.weeks_per_term {
                return Err(ParseError::MalformedWeek(part.to_string()));
            }
            Ok(week - 1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskRecord;

    #[test]
    fn test_placed_and_unplaced() {
        let a = Assignment::placed(0, 1, vec![8], vec![0]);
        assert!(a.is_placed());

        let u = Assignment::unplaced(0, vec![0]);
        assert!(!u.is_placed());
        assert!(u.room.is_none());

        let no_slots = Assignment {
            task: 0,
            room: Some(0),
            slots: Vec::new(),
            weeks: vec![0],
        };
        assert!(!no_slots.is_placed());
    }

    #[test]
    fn test_day_boundaries() {
        let g = TermGrid::default();
        let ok = Assignment::placed(0, 0, vec![6, 14], vec![0]);
        assert!(ok.respects_day_boundaries(2, &g));

        let spans = Assignment::placed(0, 0, vec![7], vec![0]);
        assert!(!spans.respects_day_boundaries(2, &g));
    }

    #[test]
    fn test_encode_slots() {
        let g = TermGrid::default();
        // Day 2 slot 1, day 4 slot 5.
        let encoded = encode_slots(&[8, 28], 2, &g);
        assert_eq!(encoded, "2:1-2,4:5-6");
    }

    #[test]
    fn test_decode_slots() {
        let g = TermGrid::default();
        let spans = decode_slots("2:1-2, 4:5-6", &g).unwrap();
        assert_eq!(
            spans,
            vec![
                SlotSpan { start: 8, length: 2 },
                SlotSpan { start: 28, length: 2 }
            ]
        );
        assert_eq!(spans[1].end(), 29);
        assert!(decode_slots("", &g).unwrap().is_empty());
    }

    #[test]
    fn test_decode_slots_rejects_bad_input() {
        let g = TermGrid::default();
        assert!(matches!(
            decode_slots("2-1-2", &g),
            Err(ParseError::MalformedSlot(_))
        ));
        assert!(matches!(
            decode_slots("6:1-2", &g),
            Err(ParseError::SlotOutOfRange(_))
        ));
        assert!(matches!(
            decode_slots("1:7-9", &g),
            Err(ParseError::SlotOutOfRange(_))
        ));
        assert!(matches!(
            decode_slots("1:3-2", &g),
            Err(ParseError::SlotOutOfRange(_))
        ));
    }

    #[test]
    fn test_weeks_encoding() {
        let g = TermGrid::default();
        assert_eq!(encode_weeks(&[0, 1, 9]), "1,2,10");
        assert_eq!(decode_weeks("1,2,10", &g).unwrap(), vec![0, 1, 9]);
        assert!(decode_weeks("", &g).unwrap().is_empty());
        assert!(matches!(
            decode_weeks("1,x", &g),
            Err(ParseError::MalformedWeek(_))
        ));
        assert!(matches!(
            decode_weeks("21", &g),
            Err(ParseError::MalformedWeek(_))
        ));
    }

    #[test]
    fn test_record_from_assignment() {
        let g = TermGrid::default();
        let task = Task::from_record(
            TaskRecord::new("TC7", "1-2:2")
                .with_course("C1", "Algebra")
                .with_duration(2),
            &g,
        )
        .unwrap();
        let room = Classroom::new("R1", 40).with_name("Room 1");

        let placed = Assignment::placed(0, 0, vec![8], task.weeks().to_vec());
        let rec = AssignmentRecord::from_assignment(&placed, &task, Some(&room), &g);
        assert_eq!(rec.course_id, "C1");
        assert_eq!(rec.teaching_class_id, "TC7");
        assert_eq!(rec.classroom_id.as_deref(), Some("R1"));
        assert_eq!(rec.classroom_name.as_deref(), Some("Room 1"));
        assert_eq!(rec.slot, "2:1-2");
        assert_eq!(rec.weeks, "1,2");
        assert!(rec.is_placed());

        let unplaced = Assignment::unplaced(0, task.weeks().to_vec());
        let rec = AssignmentRecord::from_assignment(&unplaced, &task, None, &g);
        assert!(rec.classroom_id.is_none());
        assert!(rec.slot.is_empty());
        assert!(!rec.is_placed());
    }
}
