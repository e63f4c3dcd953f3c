//! Hard-constraint eligibility filter.
//!
//! For one task, splits the employee set into those who may take it and
//! those who may not, recording every check each excluded employee fails.
//!
//! # Hard constraints
//!
//! | Check | Passes when |
//! |-------|-------------|
//! | Training | employee training ⊇ required training |
//! | Rank | employee rank ≥ task min rank |
//! | Hours | assigned hours + task duration ≤ max hours |
//!
//! When nobody passes, [`Eligibility::failure_reasons`] condenses the
//! per-employee rejections into the human-readable reasons stored on the
//! task's failure record.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Employee, EmployeeId, Task};

/// Reason given when the employee set is empty.
pub const NO_EMPLOYEES_REASON: &str = "No employees available";

/// One failed hard constraint for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shortfall {
    /// Required labels the employee lacks, in display form.
    MissingTraining { missing: Vec<String> },
    RankTooLow { rank: i32, min_rank: i32 },
    InsufficientHours { available: f64, needed: f64 },
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shortfall::MissingTraining { missing } => {
                write!(f, "Missing required training: {}", missing.join(", "))
            }
            Shortfall::RankTooLow { rank, min_rank } => {
                write!(f, "Rank too low (rank {rank}, minimum {min_rank} required)")
            }
            Shortfall::InsufficientHours { available, needed } => {
                write!(f, "{}", hours_reason(*available, *needed))
            }
        }
    }
}

fn hours_reason(available: f64, needed: f64) -> String {
    format!(
        "Insufficient available hours (has {}h, needs {}h)",
        display_hours(available),
        display_hours(needed)
    )
}

/// Rounds to two decimals; `Display` then drops trailing zeros (`60`, `10.08`).
fn display_hours(hours: f64) -> f64 {
    // + 0.0 turns -0.0 into 0.0
    (hours * 100.0).round() / 100.0 + 0.0
}

/// Why one employee cannot take a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    pub employee_id: EmployeeId,
    /// Every failed check, in training, rank, hours order.
    pub shortfalls: Vec<Shortfall>,
}

/// Result of filtering the employee set for one task.
#[derive(Debug, Clone, Default)]
pub struct Eligibility {
    /// Indices into the employee slice, in input order.
    pub eligible: Vec<usize>,
    /// One entry per excluded employee, in input order.
    pub rejections: Vec<Rejection>,
}

/// Checks one employee against the task's hard constraints.
///
/// Returns every failed check; empty means eligible.
pub fn check_employee(task: &Task, employee: &Employee) -> Vec<Shortfall> {
    let mut shortfalls = Vec::new();

    let missing = employee.training().missing_from(task.required_training());
    if !missing.is_empty() {
        shortfalls.push(Shortfall::MissingTraining {
            missing: missing.into_iter().map(str::to_string).collect(),
        });
    }

    if employee.rank() < task.min_rank() {
        shortfalls.push(Shortfall::RankTooLow {
            rank: employee.rank(),
            min_rank: task.min_rank(),
        });
    }

    if !employee.can_work_hours(task.duration()) {
        shortfalls.push(Shortfall::InsufficientHours {
            available: employee.available_hours(),
            needed: task.duration(),
        });
    }

    shortfalls
}

/// Filters `employees` for `task`.
///
/// # Complexity
/// O(e · s) where e = employees, s = required skills.
pub fn filter(task: &Task, employees: &[Employee]) -> Eligibility {
    let mut result = Eligibility::default();

    for (idx, employee) in employees.iter().enumerate() {
        let shortfalls = check_employee(task, employee);
        if shortfalls.is_empty() {
            result.eligible.push(idx);
        } else {
            result.rejections.push(Rejection {
                employee_id: employee.id(),
                shortfalls,
            });
        }
    }

    result
}

impl Eligibility {
    /// Whether no employee qualifies.
    pub fn is_empty(&self) -> bool {
        self.eligible.is_empty()
    }

    /// Condenses the rejections into deduplicated failure reasons.
    ///
    /// Order: training, rank, hours. A required skill no employee holds
    /// is named outright; otherwise training and rank shortfalls are
    /// counted, and hour shortfalls are listed per distinct amount.
    pub fn failure_reasons(&self, task: &Task) -> Vec<String> {
        if self.eligible.is_empty() && self.rejections.is_empty() {
            return vec![NO_EMPLOYEES_REASON.to_string()];
        }

        let total = self.eligible.len() + self.rejections.len();
        let mut reasons = Vec::new();

        // Training
        let lacking_training: Vec<&Vec<String>> = self
            .rejections
            .iter()
            .flat_map(|r| &r.shortfalls)
            .filter_map(|s| match s {
                Shortfall::MissingTraining { missing } => Some(missing),
                _ => None,
            })
            .collect();

        let mut nobody_has = Vec::new();
        for label in task.required_training().labels() {
            let missing_count = lacking_training
                .iter()
                .filter(|missing| missing.iter().any(|m| m == label))
                .count();
            if missing_count == total {
                nobody_has.push(label);
            }
        }

        if !nobody_has.is_empty() {
            for label in nobody_has {
                reasons.push(format!("No employee has required skill: {label}"));
            }
        } else if !lacking_training.is_empty() {
            let mut labels: Vec<&str> = Vec::new();
            for missing in &lacking_training {
                for m in missing.iter() {
                    if !labels.contains(&m.as_str()) {
                        labels.push(m);
                    }
                }
            }
            reasons.push(format!(
                "{} required training: {}",
                employees_phrase(lacking_training.len(), "lacks", "lack"),
                labels.join(", ")
            ));
        }

        // Rank
        let low_rank = self
            .rejections
            .iter()
            .flat_map(|r| &r.shortfalls)
            .filter(|s| matches!(s, Shortfall::RankTooLow { .. }))
            .count();
        if low_rank > 0 {
            reasons.push(format!(
                "{} sufficient rank (need ≥{})",
                employees_phrase(low_rank, "lacks", "lack"),
                task.min_rank()
            ));
        }

        // Hours
        for shortfall in self.rejections.iter().flat_map(|r| &r.shortfalls) {
            if let Shortfall::InsufficientHours { available, needed } = shortfall {
                let reason = hours_reason(*available, *needed);
                if !reasons.contains(&reason) {
                    reasons.push(reason);
                }
            }
        }

        reasons
    }
}

fn employees_phrase(count: usize, singular_verb: &str, plural_verb: &str) -> String {
    if count == 1 {
        format!("1 employee {singular_verb}")
    } else {
        format!("{count} employees {plural_verb}")
    }
}
