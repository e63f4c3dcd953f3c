//! Employee model.
//!
//! An employee is the resource that performs tasks. Matching uses rank,
//! training and remaining hours; name and position are descriptive only.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::SkillSet;
use crate::validation::{self, ValidationError};

/// Stable employee identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u32);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EmployeeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// An employee available for the planning period.
///
/// Constructed only through [`Employee::builder`], so every instance has a
/// rank in 1..=10, a non-negative `max_hours` and a normalized skill set.
/// `assigned_hours` is owned by the scheduler: it grows during a run and is
/// zeroed by a reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EmployeeRecord")]
pub struct Employee {
    id: EmployeeId,
    name: String,
    position: String,
    rank: i32,
    max_hours: f64,
    training: SkillSet,
    assigned_hours: f64,
}

/// Unvalidated employee fields, as collected from a form or a stored schedule.
#[derive(Debug, Clone, Deserialize)]
struct EmployeeRecord {
    id: EmployeeId,
    name: String,
    #[serde(default)]
    position: String,
    rank: i32,
    max_hours: f64,
    #[serde(default)]
    training: SkillSet,
    #[serde(default)]
    assigned_hours: f64,
}

impl TryFrom<EmployeeRecord> for Employee {
    type Error = ValidationError;

    fn try_from(record: EmployeeRecord) -> Result<Self, Self::Error> {
        let mut employee = Employee::builder(record.id)
            .with_name(record.name)
            .with_position(record.position)
            .with_rank(record.rank)
            .with_max_hours(record.max_hours)
            .with_skill_set(record.training)
            .build()?;
        // A stored run may carry committed hours; they can never exceed capacity.
        employee.assigned_hours = record.assigned_hours.clamp(0.0, employee.max_hours);
        Ok(employee)
    }
}

/// Builder for [`Employee`]. Validation happens in [`EmployeeBuilder::build`].
#[derive(Debug, Clone)]
pub struct EmployeeBuilder {
    id: EmployeeId,
    name: String,
    position: String,
    rank: i32,
    max_hours: f64,
    training: Vec<String>,
    skill_set: SkillSet,
}

impl EmployeeBuilder {
    /// Sets the employee name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the job title.
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    /// Sets the rank (1 = junior, 10 = most senior).
    pub fn with_rank(mut self, rank: i32) -> Self {
        self.rank = rank;
        self
    }

    /// Sets the hour budget for the planning period.
    pub fn with_max_hours(mut self, max_hours: f64) -> Self {
        self.max_hours = max_hours;
        self
    }

    /// Adds a training label.
    pub fn with_training(mut self, label: impl Into<String>) -> Self {
        self.training.push(label.into());
        self
    }

    /// Adds every label from a comma-separated list.
    pub fn with_training_list(mut self, text: &str) -> Self {
        self.training
            .extend(SkillSet::parse(text).labels().map(str::to_string));
        self
    }

    /// Uses an already-normalized skill set as the base training.
    pub fn with_skill_set(mut self, skills: SkillSet) -> Self {
        self.skill_set = skills;
        self
    }

    /// Validates the fields and creates the employee.
    pub fn build(self) -> Result<Employee, ValidationError> {
        let name = validation::check_name("employee", &self.name)?;
        let rank = validation::check_rank(self.rank)?;
        let max_hours = validation::check_max_hours(self.max_hours)?;
        let mut training = self.skill_set;
        for label in &self.training {
            training.insert(label)?;
        }

        Ok(Employee {
            id: self.id,
            name,
            position: self.position.trim().to_string(),
            rank,
            max_hours,
            training,
            assigned_hours: 0.0,
        })
    }
}

impl Employee {
    /// Starts building an employee with the given ID.
    pub fn builder(id: impl Into<EmployeeId>) -> EmployeeBuilder {
        EmployeeBuilder {
            id: id.into(),
            name: String::new(),
            position: String::new(),
            rank: validation::MIN_LEVEL,
            max_hours: 0.0,
            training: Vec::new(),
            skill_set: SkillSet::new(),
        }
    }

    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn rank(&self) -> i32 {
        self.rank
    }

    pub fn max_hours(&self) -> f64 {
        self.max_hours
    }

    pub fn training(&self) -> &SkillSet {
        &self.training
    }

    /// Hours committed by the current run.
    pub fn assigned_hours(&self) -> f64 {
        self.assigned_hours
    }

    /// Remaining budget: `max_hours - assigned_hours`, never negative.
    pub fn available_hours(&self) -> f64 {
        (self.max_hours - self.assigned_hours).max(0.0)
    }

    /// Whether every label in `required` is in this employee's training.
    pub fn has_training(&self, required: &SkillSet) -> bool {
        self.training.is_superset(required)
    }

    /// Whether `hours` more fit within the budget.
    ///
    /// Compares the exact sum that [`add_hours`](Self::add_hours) would store,
    /// so an accepted task can never leave `assigned_hours > max_hours`.
    pub fn can_work_hours(&self, hours: f64) -> bool {
        self.assigned_hours + hours <= self.max_hours
    }

    /// Assigned share of the budget as a percentage (0 when `max_hours` is 0).
    pub fn utilization_pct(&self) -> f64 {
        if self.max_hours > 0.0 {
            self.assigned_hours / self.max_hours * 100.0
        } else {
            0.0
        }
    }

    /// Changes the rank. Existing assignments are not revalidated.
    pub fn set_rank(&mut self, rank: i32) -> Result<(), ValidationError> {
        self.rank = validation::check_rank(rank)?;
        Ok(())
    }

    /// Changes the hour budget. Existing assignments are not revalidated.
    pub fn set_max_hours(&mut self, max_hours: f64) -> Result<(), ValidationError> {
        self.max_hours = validation::check_max_hours(max_hours)?;
        Ok(())
    }

    /// Replaces the training set. Existing assignments are not revalidated.
    pub fn set_training(&mut self, training: SkillSet) {
        self.training = training;
    }

    pub(crate) fn add_hours(&mut self, hours: f64) {
        self.assigned_hours += hours;
    }

    pub(crate) fn reset_hours(&mut self) {
        self.assigned_hours = 0.0;
    }
}
