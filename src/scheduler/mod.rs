//! Greedy assignment and workload statistics.
//!
//! # Algorithm
//!
//! `AutoScheduler` makes one priority-ordered pass over the tasks, placing
//! each on the best-scoring eligible employee. It is not optimal, but it is
//! fast, deterministic, and explains every task it cannot place.
//!
//! # Statistics
//!
//! `compute_workload` and `ScheduleStatistics` roll up a finished schedule
//! for reporting: per-employee utilization and task counts, and overall
//! completion.

mod greedy;
mod workload;

pub use greedy::AutoScheduler;
pub use workload::{
    compute_workload, unassigned_report, EmployeeWorkload, ScheduleStatistics, TaskSummary,
    UnassignedTask,
};

use crate::models::{Employee, Schedule, Task};

/// Runs the default scheduler over a fresh schedule.
///
/// Assignments are stamped with the wall clock; use
/// [`AutoScheduler::with_timestamp`] for reproducible output.
pub fn run_schedule(employees: Vec<Employee>, tasks: Vec<Task>) -> Schedule {
    AutoScheduler::new().run(employees, tasks)
}

/// Clears assignments and failures and zeroes every employee's hours.
pub fn reset_schedule(mut schedule: Schedule) -> Schedule {
    schedule.reset();
    tracing::debug!(
        employees = schedule.employees().len(),
        tasks = schedule.tasks().len(),
        "schedule reset"
    );
    schedule
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_then_reset() {
        let employees = vec![Employee::builder(1)
            .with_name("Solo")
            .with_rank(5)
            .with_max_hours(10.0)
            .build()
            .unwrap()];
        let tasks = vec![Task::builder(1)
            .with_name("Only")
            .with_duration(4.0)
            .with_priority(5)
            .build()
            .unwrap()];

        let s = run_schedule(employees, tasks);
        assert_eq!(s.assignment_count(), 1);

        let s = reset_schedule(s);
        assert_eq!(s.assignment_count(), 0);
        assert!((s.employees()[0].assigned_hours() - 0.0).abs() < 1e-10);
        assert!(!s.tasks()[0].is_assigned());
    }
}
