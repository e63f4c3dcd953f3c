//! Skill label sets.
//!
//! Training and required training are free-text labels that compare
//! case-insensitively. `SkillSet` normalizes them once at the boundary so
//! eligibility checks are plain set operations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::validation::ValidationError;

/// A case-insensitive set of skill labels.
///
/// Keys are the lowercased labels; the first spelling seen is kept for
/// display. Iteration order is the lowercased key order, so output is
/// deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SkillSet {
    labels: BTreeMap<String, String>,
}

impl SkillSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from labels, rejecting any label that is blank after trimming.
    pub fn try_from_labels<I, S>(labels: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for label in labels {
            set.insert(label.as_ref())?;
        }
        Ok(set)
    }

    /// Parses comma-separated free text (e.g. `"Python, database ,"`).
    ///
    /// Empty fragments are dropped, so this never fails.
    pub fn parse(text: &str) -> Self {
        let mut set = Self::new();
        for fragment in text.split(',') {
            // blank fragments are skipped, not rejected
            let _ = set.insert(fragment);
        }
        set
    }

    /// Inserts a label. Returns `Ok(false)` if an equivalent label was present.
    pub fn insert(&mut self, label: &str) -> Result<bool, ValidationError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySkill);
        }
        let key = trimmed.to_lowercase();
        if self.labels.contains_key(&key) {
            return Ok(false);
        }
        self.labels.insert(key, trimmed.to_string());
        Ok(true)
    }

    /// Whether the set holds `label` (case-insensitive).
    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains_key(&label.trim().to_lowercase())
    }

    /// Whether every label of `other` is in this set.
    pub fn is_superset(&self, other: &SkillSet) -> bool {
        other.labels.keys().all(|k| self.labels.contains_key(k))
    }

    /// Labels of `other` missing from this set, in display form.
    pub fn missing_from<'a>(&self, other: &'a SkillSet) -> Vec<&'a str> {
        other
            .labels
            .iter()
            .filter(|(k, _)| !self.labels.contains_key(*k))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Display labels in deterministic order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl PartialEq for SkillSet {
    fn eq(&self, other: &Self) -> bool {
        self.labels.keys().eq(other.labels.keys())
    }
}

impl Eq for SkillSet {}

impl fmt::Display for SkillSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.labels().collect();
        write!(f, "{}", joined.join(", "))
    }
}

impl TryFrom<Vec<String>> for SkillSet {
    type Error = ValidationError;

    fn try_from(labels: Vec<String>) -> Result<Self, Self::Error> {
        Self::try_from_labels(labels)
    }
}

impl From<SkillSet> for Vec<String> {
    fn from(set: SkillSet) -> Self {
        set.labels.into_values().collect()
    }
}
