//! Greedy priority-driven assignment loop.
//!
//! # Algorithm
//!
//! 1. Reset the schedule (a run always starts from zero hours).
//! 2. Order tasks by priority descending, then earlier deadline (none
//!    last), then input order.
//! 3. For each task, filter employees by hard constraints.
//!    - None eligible: record a failure with aggregated reasons.
//!    - Otherwise: score the eligible employees, assign the best one and
//!      charge the task's hours to that employee.
//!
//! Each task is visited once and no assignment is revisited.
//!
//! # Complexity
//! O(n log n + n · e · s) where n = tasks, e = employees, s = skills/task.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, SchedulerConfig};
use crate::models::{Employee, Failure, Schedule, Task};
use crate::scoring::{self, ScoringWeights};

/// Greedy staff scheduler.
///
/// # Example
///
/// ```
/// use u_staffing::models::{Employee, Task};
/// use u_staffing::scheduler::AutoScheduler;
///
/// let employees = vec![
///     Employee::builder(1)
///         .with_name("Alice")
///         .with_rank(7)
///         .with_max_hours(80.0)
///         .with_training_list("Python, Database")
///         .build()
///         .unwrap(),
/// ];
/// let tasks = vec![
///     Task::builder(1)
///         .with_name("Auth API")
///         .with_duration(20.0)
///         .with_priority(8)
///         .with_min_rank(5)
///         .with_required_training_list("Python, Database")
///         .build()
///         .unwrap(),
/// ];
///
/// let schedule = AutoScheduler::new().run(employees, tasks);
/// assert_eq!(schedule.assignment_count(), 1);
/// assert_eq!(schedule.employees()[0].assigned_hours(), 20.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AutoScheduler {
    config: SchedulerConfig,
    timestamp: Option<DateTime<Utc>>,
}

impl AutoScheduler {
    /// Creates a scheduler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the given configuration after validating it.
    pub fn with_config(mut self, config: SchedulerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Replaces the scoring weights after validating them.
    pub fn with_weights(mut self, weights: ScoringWeights) -> Result<Self, ConfigError> {
        weights.validate()?;
        self.config.weights = weights;
        Ok(self)
    }

    /// Pins the timestamp stamped on every assignment.
    ///
    /// Without it each run uses the wall clock at the start of the run.
    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp = Some(at);
        self
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Schedules `tasks` onto `employees` in a fresh schedule for the current period.
    pub fn run(&self, employees: Vec<Employee>, tasks: Vec<Task>) -> Schedule {
        self.schedule(Schedule::new(employees, tasks))
    }

    /// Resets `schedule` and runs one greedy pass over its tasks.
    pub fn schedule(&self, mut schedule: Schedule) -> Schedule {
        schedule.reset();
        let assigned_at = self.timestamp.unwrap_or_else(Utc::now);
        let weights = self.config.weights;
        let epsilon = self.config.tie_epsilon;

        for task_idx in sort_tasks(schedule.tasks()) {
            let eligibility = schedule.eligibility(task_idx);
            let best = scoring::select_best(
                &schedule.tasks()[task_idx],
                schedule.employees(),
                &eligibility.eligible,
                &weights,
                epsilon,
            );

            match best {
                Some((employee_idx, breakdown)) => {
                    let assignment =
                        schedule.record_assignment(task_idx, employee_idx, assigned_at);
                    debug!(
                        task_id = %assignment.task_id(),
                        employee_id = %assignment.employee_id(),
                        hours = assignment.hours(),
                        score = breakdown.total,
                        candidates = eligibility.eligible.len(),
                        "assigned task"
                    );
                }
                None => {
                    let task = &schedule.tasks()[task_idx];
                    let reasons = eligibility.failure_reasons(task);
                    warn!(
                        task_id = %task.id(),
                        priority = task.priority(),
                        reasons = reasons.len(),
                        "task left unassigned"
                    );
                    let failure = Failure {
                        task_id: task.id(),
                        reasons,
                        rejections: eligibility.rejections,
                    };
                    schedule.record_failure(failure);
                }
            }
        }

        info!(
            period = %schedule.period(),
            employees = schedule.employees().len(),
            tasks = schedule.tasks().len(),
            assigned = schedule.assignment_count(),
            unassigned = schedule.failures().len(),
            hours = schedule.total_scheduled_hours(),
            "schedule run complete"
        );

        schedule
    }
}

/// Returns task indices in visiting order.
///
/// Priority descending, then earlier deadline (tasks without one last).
/// The sort is stable, so remaining ties keep input order.
fn sort_tasks(tasks: &[Task]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..tasks.len()).collect();
    indices.sort_by(|&a, &b| {
        let (ta, tb) = (&tasks[a], &tasks[b]);
        tb.priority()
            .cmp(&ta.priority())
            .then_with(|| match (ta.deadline(), tb.deadline()) {
                (Some(da), Some(db)) => da.cmp(&db),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    });
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeId, TaskId, TaskStatus};
    use chrono::{NaiveDate, TimeZone};

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 8, 30, 0).unwrap()
    }

    fn scheduler() -> AutoScheduler {
        AutoScheduler::new().with_timestamp(at())
    }

    fn employee(id: u32, rank: i32, max_hours: f64, training: &str) -> Employee {
        Employee::builder(id)
            .with_name(format!("E{id}"))
            .with_rank(rank)
            .with_max_hours(max_hours)
            .with_training_list(training)
            .build()
            .unwrap()
    }

    fn task(id: u32, duration: f64, priority: i32, min_rank: i32, training: &str) -> Task {
        Task::builder(id)
            .with_name(format!("T{id}"))
            .with_duration(duration)
            .with_priority(priority)
            .with_min_rank(min_rank)
            .with_required_training_list(training)
            .build()
            .unwrap()
    }

    fn demo_roster() -> (Vec<Employee>, Vec<Task>) {
        let employees = vec![
            employee(1, 8, 80.0, "Python, JavaScript, Database, Leadership"),
            employee(2, 5, 80.0, "Python, Database, Testing"),
            employee(3, 6, 60.0, "JavaScript, HTML, CSS, Design"),
            employee(4, 7, 70.0, "Python, Machine Learning, Database"),
        ];
        let tasks = vec![
            task(1, 20.0, 9, 5, "Python, Database"),
            task(2, 15.0, 8, 4, "JavaScript, HTML, CSS"),
            task(3, 25.0, 10, 6, "Python, Database"),
            task(4, 12.0, 7, 4, "Python, Testing"),
            task(5, 18.0, 9, 7, "Python, Machine Learning"),
            task(6, 10.0, 6, 7, "Leadership, Python"),
            task(7, 40.0, 3, 9, "Rust"),
        ];
        (employees, tasks)
    }

    #[test]
    fn test_example_scenario() {
        let employees = vec![employee(1, 7, 80.0, "Python, Database")];
        let tasks = vec![
            task(1, 20.0, 8, 5, "Python, Database"),
            task(2, 70.0, 5, 1, "Python"),
        ];

        let s = scheduler().run(employees, tasks);

        let a = s.assignment_for_task(TaskId(1)).unwrap();
        assert_eq!(a.employee_id(), EmployeeId(1));
        assert!((a.hours() - 20.0).abs() < 1e-10);
        assert_eq!(a.assigned_at(), at());
        assert!((s.employees()[0].assigned_hours() - 20.0).abs() < 1e-10);

        let f = s.failure_for_task(TaskId(2)).unwrap();
        assert_eq!(
            f.reasons,
            vec!["Insufficient available hours (has 60h, needs 70h)"]
        );
        assert_eq!(s.task(TaskId(2)).unwrap().status(), TaskStatus::Unassigned);
    }

    #[test]
    fn test_capacity_invariant() {
        let (employees, tasks) = demo_roster();
        let s = scheduler().run(employees, tasks);
        for e in s.employees() {
            assert!(e.assigned_hours() <= e.max_hours());
            let sum: f64 = s
                .assignments_for_employee(e.id())
                .iter()
                .map(|a| a.hours())
                .sum();
            assert!((sum - e.assigned_hours()).abs() < 1e-10);
        }
        assert!(s.is_valid());
    }

    #[test]
    fn test_capacity_with_fractional_hours() {
        let employees = vec![employee(1, 5, 29.8, "")];
        let tasks = vec![task(1, 8.13, 9, 1, ""), task(2, 21.67, 8, 1, "")];

        let s = scheduler().run(employees, tasks);
        let e = &s.employees()[0];
        assert!(e.assigned_hours() <= e.max_hours());
        assert_eq!(s.assignment_count(), 1);
        assert_eq!(s.assignments()[0].task_id(), TaskId(1));

        let failure = s.failure_for_task(TaskId(2)).unwrap();
        assert_eq!(
            failure.reasons,
            vec!["Insufficient available hours (has 21.67h, needs 21.67h)"]
        );
        assert!(s.is_valid());
    }

    #[test]
    fn test_partition_invariant() {
        let (employees, tasks) = demo_roster();
        let s = scheduler().run(employees, tasks);

        for t in s.tasks() {
            let assigned = s.assignments().iter().filter(|a| a.task_id() == t.id()).count();
            let failed = s.failures().iter().filter(|f| f.task_id == t.id()).count();
            assert_eq!(assigned + failed, 1, "task {} must be in exactly one set", t.id());
            assert_eq!(t.is_assigned(), assigned == 1);
        }
        assert_eq!(s.assignment_count() + s.failures().len(), s.tasks().len());
    }

    #[test]
    fn test_demo_roster_outcome() {
        let (employees, tasks) = demo_roster();
        let s = scheduler().run(employees, tasks);

        // Rust is held by nobody.
        let f = s.failure_for_task(TaskId(7)).unwrap();
        assert!(f
            .reasons
            .contains(&"No employee has required skill: Rust".to_string()));
        assert_eq!(s.assignment_count(), 6);

        // Only employee 4 has Machine Learning.
        assert_eq!(
            s.assignment_for_task(TaskId(5)).unwrap().employee_id(),
            EmployeeId(4)
        );
        // Only employee 1 has Leadership.
        assert_eq!(
            s.assignment_for_task(TaskId(6)).unwrap().employee_id(),
            EmployeeId(1)
        );
    }

    #[test]
    fn test_determinism() {
        let (employees, tasks) = demo_roster();
        let first = scheduler().run(employees.clone(), tasks.clone());
        let second = scheduler().run(employees, tasks);

        assert_eq!(first.assignments(), second.assignments());
        assert_eq!(first.failures(), second.failures());
        assert_eq!(
            serde_json::to_string(first.assignments()).unwrap(),
            serde_json::to_string(second.assignments()).unwrap()
        );
    }

    #[test]
    fn test_priority_precedence() {
        let employees = vec![employee(1, 5, 30.0, "")];
        let tasks = vec![task(1, 20.0, 3, 1, ""), task(2, 20.0, 9, 1, "")];

        let s = scheduler().run(employees, tasks);
        assert!(s.assignment_for_task(TaskId(2)).is_some());
        assert!(s.failure_for_task(TaskId(1)).is_some());
    }

    #[test]
    fn test_training_gate() {
        // Employee 1 would win on every soft score but lacks Testing.
        let employees = vec![
            employee(1, 5, 80.0, "Python"),
            employee(2, 10, 80.0, "Python, Testing"),
        ];
        let tasks = vec![task(1, 8.0, 5, 5, "Python, Testing")];

        let s = scheduler().run(employees, tasks);
        assert_eq!(
            s.assignment_for_task(TaskId(1)).unwrap().employee_id(),
            EmployeeId(2)
        );
        assert!(s.assignments_for_employee(EmployeeId(1)).is_empty());
    }

    #[test]
    fn test_idempotent_reset() {
        let (employees, tasks) = demo_roster();
        let sched = scheduler();
        let first = sched.run(employees, tasks);
        let first_assignments = first.assignments().to_vec();
        let first_failures = first.failures().to_vec();

        let mut cleared = first;
        cleared.reset();
        assert_eq!(cleared.assignment_count(), 0);

        let second = sched.schedule(cleared);
        assert_eq!(second.assignments(), first_assignments.as_slice());
        assert_eq!(second.failures(), first_failures.as_slice());
    }

    #[test]
    fn test_rerun_starts_from_zero_hours() {
        let (employees, tasks) = demo_roster();
        let sched = scheduler();
        let once = sched.run(employees, tasks);
        let hours_once = once.total_scheduled_hours();
        let twice = sched.schedule(once);
        assert!((twice.total_scheduled_hours() - hours_once).abs() < 1e-10);
    }

    #[test]
    fn test_spreads_load() {
        // Identical employees: balance pushes the second task to the idle one.
        let employees = vec![employee(1, 5, 40.0, ""), employee(2, 5, 40.0, "")];
        let tasks = vec![task(1, 10.0, 9, 5, ""), task(2, 10.0, 8, 5, "")];

        let s = scheduler().run(employees, tasks);
        assert_eq!(
            s.assignment_for_task(TaskId(1)).unwrap().employee_id(),
            EmployeeId(1)
        );
        assert_eq!(
            s.assignment_for_task(TaskId(2)).unwrap().employee_id(),
            EmployeeId(2)
        );
    }

    #[test]
    fn test_deadline_breaks_priority_ties() {
        let employees = vec![employee(1, 5, 10.0, "")];
        let late = Task::builder(1)
            .with_name("late")
            .with_duration(10.0)
            .with_priority(5)
            .with_deadline(NaiveDate::from_ymd_opt(2026, 10, 28).unwrap())
            .build()
            .unwrap();
        let early = Task::builder(2)
            .with_name("early")
            .with_duration(10.0)
            .with_priority(5)
            .with_deadline(NaiveDate::from_ymd_opt(2026, 10, 20).unwrap())
            .build()
            .unwrap();
        let undated = task(3, 10.0, 5, 1, "");

        let order = sort_tasks(&[undated.clone(), late.clone(), early.clone()]);
        assert_eq!(order, vec![2, 1, 0]);

        let s = scheduler().run(employees, vec![undated, late, early]);
        assert!(s.assignment_for_task(TaskId(2)).is_some());
    }

    #[test]
    fn test_equal_priority_keeps_input_order() {
        let tasks = vec![
            task(5, 1.0, 4, 1, ""),
            task(3, 1.0, 4, 1, ""),
            task(9, 1.0, 7, 1, ""),
        ];
        assert_eq!(sort_tasks(&tasks), vec![2, 0, 1]);
    }

    #[test]
    fn test_no_employees() {
        let s = scheduler().run(Vec::new(), vec![task(1, 5.0, 5, 1, "")]);
        let f = s.failure_for_task(TaskId(1)).unwrap();
        assert_eq!(f.reasons, vec!["No employees available"]);
    }

    #[test]
    fn test_empty_input() {
        let s = scheduler().run(Vec::new(), Vec::new());
        assert_eq!(s.assignment_count(), 0);
        assert!(s.failures().is_empty());
    }

    #[test]
    fn test_zero_budget_employee_never_assigned() {
        let employees = vec![employee(1, 5, 0.0, "")];
        let s = scheduler().run(employees, vec![task(1, 0.5, 5, 1, "")]);
        assert!(s.failure_for_task(TaskId(1)).is_some());
    }

    #[test]
    fn test_custom_weights() {
        // Rank fit alone: the exact match wins even though it is busier.
        let weights = ScoringWeights::new(1.0, 0.0, 0.0).unwrap();
        let employees = vec![employee(1, 9, 80.0, ""), employee(2, 5, 20.0, "")];
        let tasks = vec![task(1, 10.0, 5, 5, "")];

        let s = scheduler()
            .with_weights(weights)
            .unwrap()
            .run(employees, tasks);
        assert_eq!(
            s.assignment_for_task(TaskId(1)).unwrap().employee_id(),
            EmployeeId(2)
        );
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = SchedulerConfig {
            tie_epsilon: f64::NAN,
            ..SchedulerConfig::default()
        };
        assert!(AutoScheduler::new().with_config(config).is_err());
    }
}
