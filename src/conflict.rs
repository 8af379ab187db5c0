//! Diagnostic conflict check over stored assignments.
//!
//! Rebuilds one occupancy grid per room from persisted records, using the
//! same slot and week arithmetic as the greedy constructor, and reports
//! every record that cannot be replayed cleanly.
//!
//! # Checks
//!
//! | Violation | Cause |
//! |-----------|-------|
//! | `UnknownClassroom` | Room id (or name) not in the room list |
//! | `UnknownTask` | Teaching-class id not in the task list |
//! | `MalformedRecord` | Slot or week string cannot be decoded |
//! | `DayBoundary` | A block runs past the last slot of its day |
//! | `DoubleBooking` | A cell is already held by an earlier record |
//!
//! Records are replayed in order, so a double booking is reported on the
//! later of the two records. Unplaced records are ignored.

use log::debug;

use crate::error::ParseError;
use crate::models::{
    decode_slots, decode_weeks, AssignmentRecord, Occupancy, OccupancyError, TimetableProblem,
    Violation,
};

/// Replays `records` against empty room grids and returns every violation.
pub fn check_conflicts(problem: &TimetableProblem, records: &[AssignmentRecord]) -> Vec<Violation> {
    let grid = &problem.grid;
    let mut rooms = vec![Occupancy::new(*grid); problem.rooms.len()];
    let mut violations = Vec::new();

    for record in records.iter().filter(|r| r.is_placed()) {
        let id = record.teaching_class_id.as_str();
        let room_key = record.classroom_id.as_deref().unwrap_or_default();

        let Some(room_idx) = problem
            .room_index(room_key)
            .or_else(|| problem.rooms.iter().position(|r| r.name == room_key))
        else {
            violations.push(Violation::unknown_classroom(
                id,
                format!("Classroom '{room_key}' does not exist"),
            ));
            continue;
        };

        let task = problem.task_index(id).map(|idx| &problem.tasks[idx]);
        if task.is_none() {
            violations.push(Violation::unknown_task(
                id,
                format!("Teaching class '{id}' does not exist"),
            ));
        }

        let spans = match decode_slots(&record.slot, grid) {
            Ok(spans) => spans,
            Err(e @ ParseError::SlotOutOfRange(_)) => {
                violations.push(Violation::day_boundary(id, e.to_string()));
                continue;
            }
            Err(e) => {
                violations.push(Violation::malformed(id, e.to_string()));
                continue;
            }
        };

        let weeks = match decode_weeks(&record.weeks, grid) {
            Ok(weeks) if weeks.is_empty() => match task {
                Some(task) => task.weeks().to_vec(),
                None => {
                    violations.push(Violation::malformed(id, "Record has no weeks"));
                    continue;
                }
            },
            Ok(weeks) => weeks,
            Err(e) => {
                violations.push(Violation::malformed(id, e.to_string()));
                continue;
            }
        };

        let room = &problem.rooms[room_idx];
        for span in spans {
            if !grid.fits_in_day(span.start, span.length) {
                violations.push(Violation::day_boundary(
                    id,
                    format!("Block at slot {} crosses into the next day", span.start),
                ));
                continue;
            }

            match rooms[room_idx].occupy_range(&weeks, span.start, span.end()) {
                Ok(()) => {}
                Err(OccupancyError::Occupied { week, slot }) => {
                    violations.push(Violation::double_booking(
                        id,
                        format!(
                            "Room '{}' week {} day {} slot {} already occupied",
                            room.id,
                            week + 1,
                            grid.day_of(slot) + 1,
                            grid.offset_of(slot) + 1
                        ),
                    ));
                }
                Err(e) => violations.push(Violation::malformed(id, e.to_string())),
            }
        }
    }

    debug!(
        "Checked {} records, {} violations",
        records.len(),
        violations.len()
    );
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{GaConfig, GeneticScheduler};
    use crate::models::{Classroom, TaskRecord, TermGrid, ViolationType};
    use crate::store::schedule_records;

    fn problem() -> TimetableProblem {
        TimetableProblem::from_records(
            TermGrid::default(),
            vec![
                TaskRecord::new("TC1", "1-4:2").with_seats(20),
                TaskRecord::new("TC2", "1-4:2").with_seats(20),
                TaskRecord::new("TC3", "5-8:2").with_seats(20),
            ],
            vec![
                Classroom::new("R1", 40).with_name("Hall A"),
                Classroom::new("R2", 40).with_name("Hall B"),
            ],
            Vec::new(),
        )
    }

    fn record(task: &str, room: &str, slot: &str, weeks: &str) -> AssignmentRecord {
        AssignmentRecord {
            course_id: "C".into(),
            course_name: String::new(),
            teaching_class_id: task.into(),
            classroom_id: Some(room.into()),
            classroom_name: None,
            slot: slot.into(),
            weeks: weeks.into(),
        }
    }

    fn kinds(v: &[Violation]) -> Vec<ViolationType> {
        v.iter().map(|v| v.violation_type.clone()).collect()
    }

    #[test]
    fn test_clean_records() {
        let p = problem();
        let records = vec![
            record("TC1", "R1", "1:1-2", "1,2,3,4"),
            record("TC2", "R1", "1:3-4", "1,2,3,4"),
            // Same cells, disjoint weeks.
            record("TC3", "R1", "1:1-2", "5,6,7,8"),
        ];
        assert!(check_conflicts(&p, &records).is_empty());
    }

    #[test]
    fn test_double_booking_reported_on_later_record() {
        let p = problem();
        let records = vec![
            record("TC1", "R1", "2:1-2", "1,2,3,4"),
            record("TC2", "R1", "2:2-3", "4"),
        ];
        let v = check_conflicts(&p, &records);
        assert_eq!(kinds(&v), vec![ViolationType::DoubleBooking]);
        assert_eq!(v[0].entity_id, "TC2");
        assert_eq!(v[0].message, "Room 'R1' week 4 day 2 slot 2 already occupied");
    }

    #[test]
    fn test_same_slot_other_room_is_fine() {
        let p = problem();
        let records = vec![
            record("TC1", "R1", "1:1-2", "1"),
            record("TC2", "Hall B", "1:1-2", "1"),
        ];
        assert!(check_conflicts(&p, &records).is_empty());
    }

    #[test]
    fn test_unknown_references() {
        let p = problem();
        let records = vec![
            record("TC1", "R9", "1:1-2", "1"),
            record("GHOST", "R1", "1:1-2", "1"),
        ];
        let v = check_conflicts(&p, &records);
        assert_eq!(
            kinds(&v),
            vec![ViolationType::UnknownClassroom, ViolationType::UnknownTask]
        );
    }

    #[test]
    fn test_malformed_and_out_of_grid() {
        let p = problem();
        let records = vec![
            record("TC1", "R1", "1:1", "1"),
            record("TC2", "R1", "1:7-9", "1"),
            record("TC3", "R1", "1:1-2", "x"),
        ];
        let v = check_conflicts(&p, &records);
        assert_eq!(
            kinds(&v),
            vec![
                ViolationType::MalformedRecord,
                ViolationType::DayBoundary,
                ViolationType::MalformedRecord,
            ]
        );
    }

    #[test]
    fn test_empty_weeks_fall_back_to_task() {
        let p = problem();
        let records = vec![
            record("TC1", "R1", "1:1-2", ""),
            record("TC2", "R1", "1:1-2", "3"),
        ];
        let v = check_conflicts(&p, &records);
        assert_eq!(kinds(&v), vec![ViolationType::DoubleBooking]);
    }

    #[test]
    fn test_unplaced_records_ignored() {
        let p = problem();
        let mut r = record("TC1", "R1", "", "1");
        r.classroom_id = None;
        assert!(check_conflicts(&p, &[r]).is_empty());
    }

    #[test]
    fn test_ga_output_replays_cleanly() {
        let tasks = (0..10)
            .map(|i| {
                TaskRecord::new(format!("TC{i}"), "1-10:4,11-16:2")
                    .with_duration(2)
                    .with_seats(30)
            })
            .collect();
        let p = TimetableProblem::from_records(
            TermGrid::default(),
            tasks,
            vec![Classroom::new("R1", 40), Classroom::new("R2", 40)],
            Vec::new(),
        );
        let config = GaConfig::default()
            .with_population_size(10)
            .with_max_generations(5)
            .with_seed(7)
            .with_parallel(false);
        let result = GeneticScheduler::new(&p, config).run();

        let records = schedule_records(&p, &result.best.schedule);
        assert!(check_conflicts(&p, &records).is_empty());
    }
}
