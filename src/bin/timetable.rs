//! Command-line front end.
//!
//! ```text
//! timetable solve <input.json> <output.json> [config.json]
//! timetable check <input.json> <stored.json>
//! ```
//!
//! `input.json` holds `classrooms`, `tasks`, and optionally `preferences`,
//! `grid`, `ga`, and `fitness`. A separate config file, when given,
//! overrides `ga` and `fitness`. Log level follows `RUST_LOG` (default
//! `info`).

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::process::ExitCode;

use log::{error, info, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use u_timetable::conflict::check_conflicts;
use u_timetable::ga::{GaConfig, GeneticScheduler};
use u_timetable::models::{Classroom, TaskRecord, TermGrid, TimePreference, TimetableProblem};
use u_timetable::scheduler::{FitnessEvaluator, FitnessWeights};
use u_timetable::store::{persist_schedule, AssignmentStore, JsonFileStore};
use u_timetable::validation::validate_input;
use u_timetable::{StoreError, TimetableError};

const USAGE: &str = "usage:\n  \
    timetable solve <input.json> <output.json> [config.json]\n  \
    timetable check <input.json> <stored.json>";

#[derive(Debug, Deserialize)]
struct Input {
    #[serde(default)]
    grid: TermGrid,
    #[serde(default)]
    classrooms: Vec<Classroom>,
    #[serde(default)]
    tasks: Vec<TaskRecord>,
    #[serde(default)]
    preferences: Vec<TimePreference>,
    #[serde(default)]
    ga: GaConfig,
    #[serde(default)]
    fitness: FitnessWeights,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RunConfig {
    ga: GaConfig,
    fitness: FitnessWeights,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["solve", input, output] => solve(input, output, None),
        ["solve", input, output, config] => solve(input, output, Some(*config)),
        ["check", input, stored] => check(input, stored),
        _ => Err(TimetableError::InvalidInput(USAGE.to_string())),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{e}");
            ExitCode::from(2)
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn load_problem(input: &Input) -> TimetableProblem {
    if let Err(errors) = validate_input(
        &input.grid,
        &input.tasks,
        &input.classrooms,
        &input.preferences,
    ) {
        for e in &errors {
            warn!("{:?}: {}", e.kind, e.message);
        }
    }

    let problem = TimetableProblem::from_records(
        input.grid,
        input.tasks.clone(),
        input.classrooms.clone(),
        input.preferences.clone(),
    );
    info!(
        "Loaded {} tasks, {} rooms, {} preferences ({} records skipped)",
        problem.task_count(),
        problem.rooms.len(),
        problem.preferences.len(),
        problem.skipped.len()
    );
    problem
}

/// Returns `Ok(true)` when every task was placed.
fn solve(input: &str, output: &str, config: Option<&str>) -> Result<bool, TimetableError> {
    let input: Input = read_json(Path::new(input))?;
    let run = match config {
        Some(path) => read_json(Path::new(path))?,
        None => RunConfig {
            ga: input.ga.clone(),
            fitness: input.fitness,
        },
    };

    let problem = load_problem(&input);
    let result = GeneticScheduler::new(&problem, run.ga)
        .with_weights(run.fitness)
        .run();

    let best = &result.best;
    let breakdown = FitnessEvaluator::new(&problem)
        .with_weights(run.fitness)
        .breakdown(&best.schedule);
    info!(
        "Best fitness {:.3}: placed {}/{}, teacher consistency {:.3}, class consistency {:.3}, {} preferences met",
        breakdown.total(),
        breakdown.placed,
        problem.task_count(),
        breakdown.teacher_consistency,
        breakdown.class_consistency,
        breakdown.satisfied_preferences
    );
    for a in best.schedule.unplaced() {
        warn!("Unplaced: {}", problem.tasks[a.task].id());
    }

    let mut store = JsonFileStore::new(output);
    persist_schedule(&mut store, &problem, &best.schedule)?;
    Ok(best.schedule.is_complete())
}

/// Returns `Ok(true)` when the stored set has no violations.
fn check(input: &str, stored: &str) -> Result<bool, TimetableError> {
    let input: Input = read_json(Path::new(input))?;
    let problem = load_problem(&input);
    let records = JsonFileStore::new(stored).load()?;

    let violations = check_conflicts(&problem, &records);
    for v in &violations {
        warn!("{:?} [{}]: {}", v.violation_type, v.entity_id, v.message);
    }
    info!(
        "Checked {} stored records: {} violations",
        records.len(),
        violations.len()
    );
    Ok(violations.is_empty())
}
