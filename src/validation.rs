//! Input validation for staffing problems.
//!
//! Two layers:
//! - Field checks run when an `Employee` or `Task` is built. A rejected
//!   entity is never constructed, so existing state is untouched.
//! - Roster checks (`validate_roster`) run over a whole input and report
//!   every problem at once: duplicate employee IDs and duplicate task IDs.

use std::collections::HashSet;
use thiserror::Error;

use crate::models::{Employee, EmployeeId, Task, TaskId};

/// Lowest valid rank, min_rank and priority.
pub const MIN_LEVEL: i32 = 1;
/// Highest valid rank, min_rank and priority.
pub const MAX_LEVEL: i32 = 10;

/// Validation result over a whole roster.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("rank must be between 1 and 10, got {0}")]
    RankOutOfRange(i32),

    #[error("minimum rank must be between 1 and 10, got {0}")]
    MinRankOutOfRange(i32),

    #[error("priority must be between 1 and 10, got {0}")]
    PriorityOutOfRange(i32),

    #[error("duration must be a positive number of hours, got {0}")]
    InvalidDuration(f64),

    #[error("max hours must be a non-negative number, got {0}")]
    InvalidMaxHours(f64),

    #[error("{0} name must not be empty")]
    EmptyName(&'static str),

    #[error("skill labels must not be empty")]
    EmptySkill,

    #[error("duplicate employee ID: {0}")]
    DuplicateEmployeeId(EmployeeId),

    #[error("duplicate task ID: {0}")]
    DuplicateTaskId(TaskId),
}

pub(crate) fn check_rank(rank: i32) -> Result<i32, ValidationError> {
    if (MIN_LEVEL..=MAX_LEVEL).contains(&rank) {
        Ok(rank)
    } else {
        Err(ValidationError::RankOutOfRange(rank))
    }
}

pub(crate) fn check_min_rank(min_rank: i32) -> Result<i32, ValidationError> {
    if (MIN_LEVEL..=MAX_LEVEL).contains(&min_rank) {
        Ok(min_rank)
    } else {
        Err(ValidationError::MinRankOutOfRange(min_rank))
    }
}

pub(crate) fn check_priority(priority: i32) -> Result<i32, ValidationError> {
    if (MIN_LEVEL..=MAX_LEVEL).contains(&priority) {
        Ok(priority)
    } else {
        Err(ValidationError::PriorityOutOfRange(priority))
    }
}

/// Duration must be finite and strictly positive (NaN fails).
pub(crate) fn check_duration(hours: f64) -> Result<f64, ValidationError> {
    if hours.is_finite() && hours > 0.0 {
        Ok(hours)
    } else {
        Err(ValidationError::InvalidDuration(hours))
    }
}

pub(crate) fn check_max_hours(hours: f64) -> Result<f64, ValidationError> {
    if hours.is_finite() && hours >= 0.0 {
        Ok(hours)
    } else {
        Err(ValidationError::InvalidMaxHours(hours))
    }
}

pub(crate) fn check_name(entity: &'static str, name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyName(entity))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Validates a roster before scheduling.
///
/// Checks:
/// 1. No duplicate employee IDs
/// 2. No duplicate task IDs
///
/// Entity fields are already valid by construction.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_roster(employees: &[Employee], tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut employee_ids = HashSet::new();
    for e in employees {
        if !employee_ids.insert(e.id()) {
            errors.push(ValidationError::DuplicateEmployeeId(e.id()));
        }
    }

    let mut task_ids = HashSet::new();
    for t in tasks {
        if !task_ids.insert(t.id()) {
            errors.push(ValidationError::DuplicateTaskId(t.id()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
