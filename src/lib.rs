//! Staff assignment engine.
//!
//! Places a fixed set of tasks on a fixed set of employees for one
//! two-week planning period, subject to training, rank and hour-budget
//! constraints, and explains every task it could not place.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Employee`, `Task`, `SkillSet`,
//!   `Schedule`, `Assignment`, `Failure`, `PlanningPeriod`
//! - **`validation`**: Field checks at creation and roster-level checks
//!   (duplicate IDs)
//! - **`eligibility`**: Hard-constraint filter and failure reasons
//! - **`scoring`**: Soft-constraint ranking of eligible employees
//! - **`scheduler`**: The greedy assignment loop and workload statistics
//! - **`config`**: Scoring weights and tie tolerance
//!
//! # Operations
//!
//! | Operation | Entry point |
//! |-----------|-------------|
//! | Create employee | `Employee::builder(id)...build()` |
//! | Create task | `Task::builder(id)...build()` |
//! | Run schedule | `AutoScheduler::run`, `scheduler::run_schedule` |
//! | Reset schedule | `Schedule::reset`, `scheduler::reset_schedule` |
//! | Compute workload | `scheduler::compute_workload` |
//!
//! The engine holds no global state: each `Schedule` is an independent
//! value owned by its caller.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//!   (priority dispatching)
//! - Burkard, Dell'Amico & Martello (2012), "Assignment Problems"

pub mod config;
pub mod eligibility;
pub mod models;
pub mod scheduler;
pub mod scoring;
pub mod validation;
