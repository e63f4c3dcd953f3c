//! Task model.
//!
//! A task is a single block of work with a fixed duration in hours,
//! a priority, and the qualifications (rank and training) an employee
//! needs to take it on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{EmployeeId, SkillSet};
use crate::validation::{self, ValidationError};

/// Stable task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u32);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TaskId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Assignment state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    Unassigned,
    Assigned,
}

/// A task to be placed during the planning period.
///
/// `status` and `assigned_to` are written only by the scheduler and
/// always agree: `Assigned` iff `assigned_to` is `Some`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord")]
pub struct Task {
    id: TaskId,
    name: String,
    /// Hours of work.
    duration: f64,
    /// 1..=10, higher is placed first.
    priority: i32,
    min_rank: i32,
    required_training: SkillSet,
    /// Secondary ordering key only; never a hard constraint.
    deadline: Option<NaiveDate>,
    status: TaskStatus,
    assigned_to: Option<EmployeeId>,
}

#[derive(Debug, Clone, Deserialize)]
struct TaskRecord {
    id: TaskId,
    name: String,
    duration: f64,
    priority: i32,
    #[serde(default = "default_min_rank")]
    min_rank: i32,
    #[serde(default)]
    required_training: SkillSet,
    #[serde(default)]
    deadline: Option<NaiveDate>,
    #[serde(default)]
    assigned_to: Option<EmployeeId>,
}

fn default_min_rank() -> i32 {
    validation::MIN_LEVEL
}

impl TryFrom<TaskRecord> for Task {
    type Error = ValidationError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let mut builder = Task::builder(record.id)
            .with_name(record.name)
            .with_duration(record.duration)
            .with_priority(record.priority)
            .with_min_rank(record.min_rank)
            .with_skill_set(record.required_training);
        if let Some(deadline) = record.deadline {
            builder = builder.with_deadline(deadline);
        }
        let mut task = builder.build()?;
        if let Some(employee_id) = record.assigned_to {
            task.mark_assigned(employee_id);
        }
        Ok(task)
    }
}

/// Builder for [`Task`]. Validation happens in [`TaskBuilder::build`].
#[derive(Debug, Clone)]
pub struct TaskBuilder {
    id: TaskId,
    name: String,
    duration: f64,
    priority: i32,
    min_rank: i32,
    training: Vec<String>,
    skill_set: SkillSet,
    deadline: Option<NaiveDate>,
}

impl TaskBuilder {
    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the duration in hours.
    pub fn with_duration(mut self, hours: f64) -> Self {
        self.duration = hours;
        self
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the minimum employee rank (default 1).
    pub fn with_min_rank(mut self, min_rank: i32) -> Self {
        self.min_rank = min_rank;
        self
    }

    /// Adds a required training label.
    pub fn with_required_training(mut self, label: impl Into<String>) -> Self {
        self.training.push(label.into());
        self
    }

    /// Adds every label from a comma-separated list.
    pub fn with_required_training_list(mut self, text: &str) -> Self {
        self.training
            .extend(SkillSet::parse(text).labels().map(str::to_string));
        self
    }

    /// Uses an already-normalized skill set as the base requirement.
    pub fn with_skill_set(mut self, skills: SkillSet) -> Self {
        self.skill_set = skills;
        self
    }

    /// Sets the deadline (ordering hint among equal priorities).
    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Validates the fields and creates the task.
    pub fn build(self) -> Result<Task, ValidationError> {
        let name = validation::check_name("task", &self.name)?;
        let duration = validation::check_duration(self.duration)?;
        let priority = validation::check_priority(self.priority)?;
        let min_rank = validation::check_min_rank(self.min_rank)?;
        let mut required_training = self.skill_set;
        for label in &self.training {
            required_training.insert(label)?;
        }

        Ok(Task {
            id: self.id,
            name,
            duration,
            priority,
            min_rank,
            required_training,
            deadline: self.deadline,
            status: TaskStatus::Unassigned,
            assigned_to: None,
        })
    }
}

impl Task {
    /// Starts building a task with the given ID.
    pub fn builder(id: impl Into<TaskId>) -> TaskBuilder {
        TaskBuilder {
            id: id.into(),
            name: String::new(),
            duration: 0.0,
            priority: validation::MIN_LEVEL,
            min_rank: validation::MIN_LEVEL,
            training: Vec::new(),
            skill_set: SkillSet::new(),
            deadline: None,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn min_rank(&self) -> i32 {
        self.min_rank
    }

    pub fn required_training(&self) -> &SkillSet {
        &self.required_training
    }

    pub fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn assigned_to(&self) -> Option<EmployeeId> {
        self.assigned_to
    }

    pub fn is_assigned(&self) -> bool {
        self.status == TaskStatus::Assigned
    }

    /// Changes the minimum rank. Existing assignments are not revalidated.
    pub fn set_min_rank(&mut self, min_rank: i32) -> Result<(), ValidationError> {
        self.min_rank = validation::check_min_rank(min_rank)?;
        Ok(())
    }

    /// Replaces the required training. Existing assignments are not revalidated.
    pub fn set_required_training(&mut self, training: SkillSet) {
        self.required_training = training;
    }

    pub(crate) fn mark_assigned(&mut self, employee_id: EmployeeId) {
        self.status = TaskStatus::Assigned;
        self.assigned_to = Some(employee_id);
    }

    pub(crate) fn mark_unassigned(&mut self) {
        self.status = TaskStatus::Unassigned;
        self.assigned_to = None;
    }
}
