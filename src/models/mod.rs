//! Staffing domain models.
//!
//! Provides the data types for one planning period: who can work
//! (`Employee`), what needs doing (`Task`), and the result of placing
//! one on the other (`Schedule`, `Assignment`, `Failure`).
//!
//! # Domain Mappings
//!
//! | u-staffing | Software team | Hospital ward | Warehouse |
//! |------------|---------------|---------------|-----------|
//! | Employee | Engineer | Nurse | Picker |
//! | Task | Ticket | Procedure | Order batch |
//! | Training | Tech stack | Certification | Forklift licence |
//! | Rank | Seniority | Grade | Shift lead level |

mod employee;
mod period;
mod schedule;
mod skills;
mod task;

pub use employee::{Employee, EmployeeBuilder, EmployeeId};
pub use period::{PlanningPeriod, PERIOD_DAYS};
pub use schedule::{Assignment, Failure, Schedule, HOURS_EPSILON};
pub use skills::SkillSet;
pub use task::{Task, TaskBuilder, TaskId, TaskStatus};
