//! Workload and schedule statistics.
//!
//! Read-only rollups over a finished schedule, consumed by reporting and
//! export layers.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Utilization | assigned_hours / max_hours × 100 (0 for a zero budget) |
//! | Completion rate | assigned tasks / total tasks × 100 (100 with no tasks) |
//! | Average hours | total scheduled hours / employees (0 with no employees) |

use serde::{Deserialize, Serialize};

use crate::models::{EmployeeId, Schedule, TaskId};

/// A task as listed under its employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub task_id: TaskId,
    pub name: String,
    pub hours: f64,
}

/// Per-employee load after a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeWorkload {
    pub employee_id: EmployeeId,
    pub name: String,
    pub position: String,
    pub rank: i32,
    pub assigned_hours: f64,
    pub max_hours: f64,
    pub available_hours: f64,
    /// Percentage (0..=100).
    pub utilization_pct: f64,
    pub task_count: usize,
    /// Assigned tasks in assignment order.
    pub tasks: Vec<TaskSummary>,
}

/// Computes per-employee workload.
///
/// Ordered by utilization descending, then employee ID.
pub fn compute_workload(schedule: &Schedule) -> Vec<EmployeeWorkload> {
    let mut report: Vec<EmployeeWorkload> = schedule
        .employees()
        .iter()
        .map(|e| {
            let tasks: Vec<TaskSummary> = schedule
                .assignments_for_employee(e.id())
                .into_iter()
                .map(|a| TaskSummary {
                    task_id: a.task_id(),
                    name: schedule
                        .task(a.task_id())
                        .map(|t| t.name().to_string())
                        .unwrap_or_default(),
                    hours: a.hours(),
                })
                .collect();

            EmployeeWorkload {
                employee_id: e.id(),
                name: e.name().to_string(),
                position: e.position().to_string(),
                rank: e.rank(),
                assigned_hours: e.assigned_hours(),
                max_hours: e.max_hours(),
                available_hours: e.available_hours(),
                utilization_pct: e.utilization_pct(),
                task_count: tasks.len(),
                tasks,
            }
        })
        .collect();

    report.sort_by(|a, b| {
        b.utilization_pct
            .total_cmp(&a.utilization_pct)
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });
    report
}

/// Schedule-wide totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStatistics {
    pub total_employees: usize,
    pub total_tasks: usize,
    pub assigned_tasks: usize,
    pub unassigned_tasks: usize,
    /// Percentage of tasks assigned.
    pub completion_rate: f64,
    pub total_scheduled_hours: f64,
    pub average_hours_per_employee: f64,
    /// See [`Schedule::is_valid`].
    pub is_valid: bool,
}

impl ScheduleStatistics {
    /// Computes totals from a schedule.
    pub fn calculate(schedule: &Schedule) -> Self {
        let total_employees = schedule.employees().len();
        let total_tasks = schedule.tasks().len();
        let assigned_tasks = schedule.assigned_tasks().len();
        let total_scheduled_hours = schedule.total_scheduled_hours();

        let average_hours_per_employee = if total_employees == 0 {
            0.0
        } else {
            total_scheduled_hours / total_employees as f64
        };

        Self {
            total_employees,
            total_tasks,
            assigned_tasks,
            unassigned_tasks: total_tasks - assigned_tasks,
            completion_rate: schedule.completion_rate(),
            total_scheduled_hours,
            average_hours_per_employee,
            is_valid: schedule.is_valid(),
        }
    }
}

/// A failed task with its requirements and the reasons it was not placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnassignedTask {
    pub task_id: TaskId,
    pub name: String,
    pub priority: i32,
    pub duration: f64,
    pub required_training: Vec<String>,
    pub min_rank: i32,
    pub reasons: Vec<String>,
}

/// Lists failed tasks in the order the run visited them.
pub fn unassigned_report(schedule: &Schedule) -> Vec<UnassignedTask> {
    schedule
        .failures()
        .iter()
        .filter_map(|f| {
            let task = schedule.task(f.task_id)?;
            Some(UnassignedTask {
                task_id: task.id(),
                name: task.name().to_string(),
                priority: task.priority(),
                duration: task.duration(),
                required_training: task
                    .required_training()
                    .labels()
                    .map(str::to_string)
                    .collect(),
                min_rank: task.min_rank(),
                reasons: f.reasons.clone(),
            })
        })
        .collect()
}
