//! Classroom timetabling engine.
//!
//! Assigns teaching tasks to rooms and weekly time slots for an academic
//! term. Hard constraints (seating capacity, designated room or room type,
//! no double booking) are enforced by construction; soft goals (room-use
//! consistency per teacher and class group, personal time preferences)
//! are scored by the fitness function.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TermGrid`, `Task`, `Classroom`,
//!   `Occupancy`, `Assignment`, `Schedule`, `TimetableProblem`
//! - **`scheduler`**: Greedy constructor (ordering → schedule) and fitness
//! - **`ga`**: Genetic search over task orderings
//! - **`store`**: Assignment persistence (memory, JSON file)
//! - **`conflict`**: Double-booking diagnostics over stored assignments
//! - **`validation`**: Input integrity checks (duplicate IDs, room refs, week schedules)
//! - **`error`**: Error types
//!
//! # Example
//!
//! ```
//! use u_timetable::ga::{GaConfig, GeneticScheduler};
//! use u_timetable::models::{Classroom, TaskRecord, TermGrid, TimetableProblem};
//!
//! let problem = TimetableProblem::from_records(
//!     TermGrid::default(),
//!     vec![TaskRecord::new("TC1", "1-16:4").with_seats(40).with_duration(2)],
//!     vec![Classroom::new("R1", 60)],
//!     Vec::new(),
//! );
//! let config = GaConfig::default()
//!     .with_population_size(10)
//!     .with_seed(42)
//!     .with_parallel(false);
//! let result = GeneticScheduler::new(&problem, config).run();
//! assert!(result.best.schedule.is_complete());
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

pub mod conflict;
pub mod error;
pub mod ga;
pub mod models;
pub mod scheduler;
pub mod store;
pub mod validation;

pub use error::{ParseError, StoreError, TimetableError};
