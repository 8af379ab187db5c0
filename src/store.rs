//! Assignment persistence.
//!
//! The store is an external sink: a finished run converts every
//! assignment of the winning schedule into an [`AssignmentRecord`] and
//! replaces the whole stored set at once. Replacement is all-or-nothing;
//! a failed write leaves the previous set in place.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::error::StoreError;
use crate::models::{AssignmentRecord, Schedule, TimetableProblem};

/// Keeps the current assignment set.
pub trait AssignmentStore {
    /// Returns every stored record.
    fn load(&self) -> Result<Vec<AssignmentRecord>, StoreError>;

    /// Replaces the stored set with `records`.
    fn replace_all(&mut self, records: &[AssignmentRecord]) -> Result<(), StoreError>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<AssignmentRecord>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored records.
    pub fn records(&self) -> &[AssignmentRecord] {
        &self.records
    }
}

impl AssignmentStore for MemoryStore {
    fn load(&self) -> Result<Vec<AssignmentRecord>, StoreError> {
        Ok(self.records.clone())
    }

    fn replace_all(&mut self, records: &[AssignmentRecord]) -> Result<(), StoreError> {
        self.records = records.to_vec();
        Ok(())
    }
}

/// Store backed by a JSON array on disk.
///
/// `replace_all` writes a sibling temporary file and renames it over the
/// target, so readers see either the old or the new set.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store at `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl AssignmentStore for JsonFileStore {
    /// A missing file loads as an empty set.
    fn load(&self) -> Result<Vec<AssignmentRecord>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    fn replace_all(&mut self, records: &[AssignmentRecord]) -> Result<(), StoreError> {
        let temp = self.temp_path();
        if let Err(e) = write_json(&temp, records) {
            let _ = fs::remove_file(&temp);
            return Err(e);
        }
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

fn write_json(path: &Path, records: &[AssignmentRecord]) -> Result<(), StoreError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}

/// Converts every assignment of `schedule` to its stored shape, in task
/// order. Unplaced tasks keep a record with no room and an empty slot.
pub fn schedule_records(problem: &TimetableProblem, schedule: &Schedule) -> Vec<AssignmentRecord> {
    let mut assignments: Vec<_> = schedule.assignments.iter().collect();
    assignments.sort_by_key(|a| a.task);

    assignments
        .into_iter()
        .filter_map(|a| {
            let task = problem.tasks.get(a.task)?;
            let room = a.room.and_then(|r| problem.rooms.get(r));
            Some(AssignmentRecord::from_assignment(a, task, room, &problem.grid))
        })
        .collect()
}

/// Replaces the store's contents with `schedule`. Returns the number of
/// records written.
pub fn persist_schedule<S: AssignmentStore + ?Sized>(
    store: &mut S,
    problem: &TimetableProblem,
    schedule: &Schedule,
) -> Result<usize, StoreError> {
    let records = schedule_records(problem, schedule);
    store.replace_all(&records)?;
    info!(
        "Persisted {} assignments ({} placed)",
        records.len(),
        records.iter().filter(|r| r.is_placed()).count()
    );
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, Classroom, TaskRecord, TermGrid};

    fn problem() -> TimetableProblem {
        TimetableProblem::from_records(
            TermGrid::default(),
            vec![
                TaskRecord::new("TC1", "1-2:4")
                    .with_course("C1", "Algebra")
                    .with_duration(2),
                TaskRecord::new("TC2", "3-3:2").with_course("C2", "Physics"),
            ],
            vec![Classroom::new("R1", 40).with_name("Main Hall")],
            Vec::new(),
        )
    }

    fn schedule() -> Schedule {
        Schedule::new(vec![
            Assignment::unplaced(1, vec![2]),
            Assignment::placed(0, 0, vec![0, 10], vec![0, 1]),
        ])
    }

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "u-timetable-{}-{}.json",
            std::process::id(),
            name
        ))
    }

    #[test]
    fn test_schedule_records() {
        let p = problem();
        let records = schedule_records(&p, &schedule());

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].teaching_class_id, "TC1");
        assert_eq!(records[0].course_name, "Algebra");
        assert_eq!(records[0].classroom_id.as_deref(), Some("R1"));
        assert_eq!(records[0].classroom_name.as_deref(), Some("Main Hall"));
        assert_eq!(records[0].slot, "1:1-2,2:3-4");
        assert_eq!(records[0].weeks, "1,2");

        assert_eq!(records[1].teaching_class_id, "TC2");
        assert!(!records[1].is_placed());
        assert!(records[1].slot.is_empty());
        assert_eq!(records[1].weeks, "3");
    }

    #[test]
    fn test_memory_store_replaces() {
        let p = problem();
        let mut store = MemoryStore::new();
        store
            .replace_all(&[AssignmentRecord {
                course_id: "OLD".into(),
                course_name: String::new(),
                teaching_class_id: "OLD".into(),
                classroom_id: None,
                classroom_name: None,
                slot: String::new(),
                weeks: String::new(),
            }])
            .unwrap();

        let written = persist_schedule(&mut store, &p, &schedule()).unwrap();
        assert_eq!(written, 2);
        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.iter().all(|r| r.teaching_class_id != "OLD"));
    }

    #[test]
    fn test_json_store_round_trip() {
        let path = temp_file("round-trip");
        let _ = fs::remove_file(&path);
        let mut store = JsonFileStore::new(&path);
        assert!(store.load().unwrap().is_empty());

        let p = problem();
        persist_schedule(&mut store, &p, &schedule()).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, schedule_records(&p, &schedule()));
        assert!(!store.temp_path().exists());

        // Second write replaces, not appends.
        persist_schedule(&mut store, &p, &Schedule::default()).unwrap();
        assert!(store.load().unwrap().is_empty());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_json_store_write_into_missing_dir_fails() {
        let dir = temp_file("missing-dir");
        let mut store = JsonFileStore::new(dir.join("nested").join("out.json"));
        assert!(matches!(store.replace_all(&[]), Err(StoreError::Io(_))));
    }

    #[test]
    fn test_json_store_rejects_garbage() {
        let path = temp_file("garbage");
        fs::write(&path, "not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Json(_))));
        let _ = fs::remove_file(&path);
    }
}
