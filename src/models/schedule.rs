//! Schedule (solution) model.
//!
//! A schedule owns the employee and task snapshot for one planning period
//! together with the outcome of the last run: one assignment per placed
//! task and one failure record per task that could not be placed.
//!
//! # Invariants (after a run)
//! - Assignments and failures partition the task set.
//! - Every employee's `assigned_hours` is the sum of its assignments' hours
//!   and never exceeds `max_hours`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Employee, EmployeeId, PlanningPeriod, Task, TaskId};
use crate::eligibility::{self, Rejection};

/// Tolerance when comparing an employee's hours with the sum of its assignments.
pub const HOURS_EPSILON: f64 = 1e-9;

/// A task placed on an employee.
///
/// Created only by the scheduler; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    task_id: TaskId,
    employee_id: EmployeeId,
    hours: f64,
    assigned_at: DateTime<Utc>,
}

impl Assignment {
    pub(crate) fn new(
        task_id: TaskId,
        employee_id: EmployeeId,
        hours: f64,
        assigned_at: DateTime<Utc>,
    ) -> Self {
        Self {
            task_id,
            employee_id,
            hours,
            assigned_at,
        }
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    pub fn hours(&self) -> f64 {
        self.hours
    }

    pub fn assigned_at(&self) -> DateTime<Utc> {
        self.assigned_at
    }
}

/// Why a task ended the run unassigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    pub task_id: TaskId,
    /// Human-readable, deduplicated, in training/rank/hours order.
    pub reasons: Vec<String>,
    /// Per-employee detail the reasons were derived from.
    pub rejections: Vec<Rejection>,
}

/// Employees, tasks and the result of the last scheduling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    period: PlanningPeriod,
    created_at: DateTime<Utc>,
    employees: Vec<Employee>,
    tasks: Vec<Task>,
    assignments: Vec<Assignment>,
    failures: Vec<Failure>,
}

impl Schedule {
    /// Creates an unscheduled schedule for the current two-week period.
    pub fn new(employees: Vec<Employee>, tasks: Vec<Task>) -> Self {
        Self {
            period: PlanningPeriod::current(),
            created_at: Utc::now(),
            employees,
            tasks,
            assignments: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Sets the planning period.
    pub fn with_period(mut self, period: PlanningPeriod) -> Self {
        self.period = period;
        self
    }

    /// Sets the creation timestamp.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn period(&self) -> PlanningPeriod {
        self.period
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Consumes the schedule, returning its employee and task snapshot.
    pub fn into_parts(self) -> (Vec<Employee>, Vec<Task>) {
        (self.employees, self.tasks)
    }

    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id() == id)
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    /// Mutable access for field edits. Existing results are kept as-is.
    pub fn employee_mut(&mut self, id: EmployeeId) -> Option<&mut Employee> {
        self.employees.iter_mut().find(|e| e.id() == id)
    }

    /// Mutable access for field edits. Existing results are kept as-is.
    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id() == id)
    }

    /// Adds an employee. Clears the previous run's results.
    pub fn add_employee(&mut self, employee: Employee) {
        self.reset();
        self.employees.push(employee);
    }

    /// Removes an employee. Clears the previous run's results.
    pub fn remove_employee(&mut self, id: EmployeeId) -> Option<Employee> {
        let pos = self.employees.iter().position(|e| e.id() == id)?;
        self.reset();
        Some(self.employees.remove(pos))
    }

    /// Adds a task. Clears the previous run's results.
    pub fn add_task(&mut self, task: Task) {
        self.reset();
        self.tasks.push(task);
    }

    /// Removes a task. Clears the previous run's results.
    pub fn remove_task(&mut self, id: TaskId) -> Option<Task> {
        let pos = self.tasks.iter().position(|t| t.id() == id)?;
        self.reset();
        Some(self.tasks.remove(pos))
    }

    pub fn assignment_for_task(&self, task_id: TaskId) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.task_id == task_id)
    }

    pub fn failure_for_task(&self, task_id: TaskId) -> Option<&Failure> {
        self.failures.iter().find(|f| f.task_id == task_id)
    }

    /// Returns all assignments for a given employee.
    pub fn assignments_for_employee(&self, employee_id: EmployeeId) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .collect()
    }

    /// Tasks assigned to a given employee, in task input order.
    pub fn tasks_for_employee(&self, employee_id: EmployeeId) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.assigned_to() == Some(employee_id))
            .collect()
    }

    pub fn assigned_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.is_assigned()).collect()
    }

    pub fn unassigned_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| !t.is_assigned()).collect()
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Sum of assigned hours across employees.
    pub fn total_scheduled_hours(&self) -> f64 {
        self.employees.iter().map(|e| e.assigned_hours()).sum()
    }

    /// Percentage of tasks assigned (100 when there are no tasks).
    pub fn completion_rate(&self) -> f64 {
        if self.tasks.is_empty() {
            return 100.0;
        }
        self.assigned_tasks().len() as f64 / self.tasks.len() as f64 * 100.0
    }

    /// Whether the schedule still satisfies every hard constraint.
    ///
    /// Checks capacity for every employee and re-checks training and rank
    /// for every assignment against the current definitions, so it turns
    /// `false` after an edit that invalidates an existing assignment. Also
    /// requires each task's status and each employee's hours to agree with
    /// the assignment list, which a hand-edited stored schedule may violate.
    pub fn is_valid(&self) -> bool {
        let hours_consistent = self.employees.iter().all(|e| {
            let booked: f64 = self
                .assignments_for_employee(e.id())
                .iter()
                .map(|a| a.hours())
                .sum();
            e.assigned_hours() <= e.max_hours()
                && (booked - e.assigned_hours()).abs() <= HOURS_EPSILON
        });
        if !hours_consistent {
            return false;
        }

        let status_consistent = self.tasks.iter().all(|t| {
            t.assigned_to() == self.assignment_for_task(t.id()).map(|a| a.employee_id())
        });
        if !status_consistent {
            return false;
        }

        self.assignments.iter().all(|a| {
            match (self.task(a.task_id), self.employee(a.employee_id)) {
                (Some(task), Some(employee)) => {
                    employee.has_training(task.required_training())
                        && employee.rank() >= task.min_rank()
                }
                _ => false,
            }
        })
    }

    /// Clears all assignments and failures and zeroes every employee's hours.
    ///
    /// Employee and task definitions are untouched.
    pub fn reset(&mut self) {
        self.assignments.clear();
        self.failures.clear();
        for employee in &mut self.employees {
            employee.reset_hours();
        }
        for task in &mut self.tasks {
            task.mark_unassigned();
        }
    }

    /// Places `tasks[task_idx]` on `employees[employee_idx]`.
    pub(crate) fn record_assignment(
        &mut self,
        task_idx: usize,
        employee_idx: usize,
        assigned_at: DateTime<Utc>,
    ) -> &Assignment {
        let task = &mut self.tasks[task_idx];
        let employee = &mut self.employees[employee_idx];
        employee.add_hours(task.duration());
        task.mark_assigned(employee.id());
        self.assignments.push(Assignment::new(
            task.id(),
            employee.id(),
            task.duration(),
            assigned_at,
        ));
        &self.assignments[self.assignments.len() - 1]
    }

    pub(crate) fn record_failure(&mut self, failure: Failure) {
        self.failures.push(failure);
    }

    /// Runs the eligibility filter for `tasks[task_idx]` against the current hours.
    pub(crate) fn eligibility(&self, task_idx: usize) -> eligibility::Eligibility {
        eligibility::filter(&self.tasks[task_idx], &self.employees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap()
    }

    fn sample_schedule() -> Schedule {
        let employees = vec![
            Employee::builder(1)
                .with_name("Alice")
                .with_rank(7)
                .with_max_hours(80.0)
                .with_training_list("Python, Database")
                .build()
                .unwrap(),
            Employee::builder(2)
                .with_name("Bob")
                .with_rank(4)
                .with_max_hours(40.0)
                .build()
                .unwrap(),
        ];
        let tasks = vec![
            Task::builder(10)
                .with_name("API")
                .with_duration(20.0)
                .with_priority(8)
                .with_min_rank(5)
                .with_required_training_list("Python")
                .build()
                .unwrap(),
            Task::builder(11)
                .with_name("Docs")
                .with_duration(6.0)
                .with_priority(3)
                .build()
                .unwrap(),
        ];
        Schedule::new(employees, tasks)
    }

    #[test]
    fn test_record_assignment() {
        let mut s = sample_schedule();
        let a = s.record_assignment(0, 0, at()).clone();

        assert_eq!(a.task_id(), TaskId(10));
        assert_eq!(a.employee_id(), EmployeeId(1));
        assert!((a.hours() - 20.0).abs() < 1e-10);
        assert_eq!(a.assigned_at(), at());

        assert!((s.employees()[0].assigned_hours() - 20.0).abs() < 1e-10);
        assert_eq!(s.tasks()[0].assigned_to(), Some(EmployeeId(1)));
        assert_eq!(s.assignment_count(), 1);
        assert_eq!(s.tasks_for_employee(EmployeeId(1)).len(), 1);
        assert_eq!(s.assignments_for_employee(EmployeeId(2)).len(), 0);
        assert!(s.assignment_for_task(TaskId(10)).is_some());
        assert!((s.completion_rate() - 50.0).abs() < 1e-10);
        assert!((s.total_scheduled_hours() - 20.0).abs() < 1e-10);
        assert!(s.is_valid());
    }

    #[test]
    fn test_reset_clears_results_keeps_definitions() {
        let mut s = sample_schedule();
        s.record_assignment(0, 0, at());
        s.record_failure(Failure {
            task_id: TaskId(11),
            reasons: vec!["x".into()],
            rejections: Vec::new(),
        });

        s.reset();
        assert_eq!(s.assignment_count(), 0);
        assert!(s.failures().is_empty());
        assert!(s.employees().iter().all(|e| e.assigned_hours() == 0.0));
        assert!(s.tasks().iter().all(|t| !t.is_assigned()));
        assert_eq!(s.employees().len(), 2);
        assert_eq!(s.tasks().len(), 2);
        assert_eq!(s.employees()[0].rank(), 7);
    }

    #[test]
    fn test_stale_after_edit_detected() {
        let mut s = sample_schedule();
        s.record_assignment(0, 0, at());
        assert!(s.is_valid());

        // Raising the bar after the fact leaves the assignment in place.
        s.task_mut(TaskId(10)).unwrap().set_min_rank(9).unwrap();
        assert_eq!(s.assignment_count(), 1);
        assert!(!s.is_valid());
    }

    #[test]
    fn test_capacity_edit_detected() {
        let mut s = sample_schedule();
        s.record_assignment(0, 0, at());
        s.employee_mut(EmployeeId(1))
            .unwrap()
            .set_max_hours(10.0)
            .unwrap();
        assert!(!s.is_valid());
    }

    #[test]
    fn test_stored_schedule_status_mismatch_detected() {
        let mut s = sample_schedule();
        s.record_assignment(0, 0, at());

        let mut value = serde_json::to_value(&s).unwrap();
        let restored: Schedule = serde_json::from_value(value.clone()).unwrap();
        assert!(restored.is_valid());
        assert_eq!(restored.tasks()[0].assigned_to(), Some(EmployeeId(1)));

        // Task still marked Assigned, hours zeroed, assignment list dropped.
        value["assignments"] = serde_json::json!([]);
        value["employees"][0]["assigned_hours"] = serde_json::json!(0.0);
        let tampered: Schedule = serde_json::from_value(value).unwrap();
        assert!(tampered.tasks()[0].is_assigned());
        assert!(!tampered.is_valid());
    }

    #[test]
    fn test_stored_hours_mismatch_detected() {
        let mut s = sample_schedule();
        s.record_assignment(0, 0, at());

        let mut value = serde_json::to_value(&s).unwrap();
        value["employees"][1]["assigned_hours"] = serde_json::json!(5.0);
        let tampered: Schedule = serde_json::from_value(value).unwrap();
        assert!(!tampered.is_valid());
    }

    #[test]
    fn test_structural_edits_reset() {
        let mut s = sample_schedule();
        s.record_assignment(0, 0, at());

        let removed = s.remove_task(TaskId(11)).unwrap();
        assert_eq!(removed.id(), TaskId(11));
        assert_eq!(s.assignment_count(), 0);
        assert!(s.remove_task(TaskId(99)).is_none());

        s.add_task(removed);
        assert_eq!(s.tasks().len(), 2);
        assert!(s.remove_employee(EmployeeId(2)).is_some());
        assert_eq!(s.employees().len(), 1);
    }

    #[test]
    fn test_empty_schedule() {
        let s = Schedule::new(Vec::new(), Vec::new());
        assert!((s.completion_rate() - 100.0).abs() < 1e-10);
        assert!((s.total_scheduled_hours() - 0.0).abs() < 1e-10);
        assert!(s.is_valid());
    }
}
