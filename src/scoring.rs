//! Soft-constraint scoring of eligible employees.
//!
//! Every eligible employee gets a score in [0, 1]; the highest wins.
//!
//! # Components
//!
//! | Component | Formula | Prefers |
//! |-----------|---------|---------|
//! | Rank fit | 1 − (rank − min_rank) / 9 | rank close to the minimum |
//! | Headroom | available / max_hours | more slack left |
//! | Balance | 1 − assigned / max_hours | less load so far |
//!
//! Score = w_rank · rank_fit + w_headroom · headroom + w_balance · balance,
//! with the weights summing to 1.
//!
//! # Ties
//! Scores within `epsilon` are equal. Equal scores go to the employee with
//! fewer assigned hours, then the lower employee ID.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::config::ConfigError;
use crate::models::{Employee, Task};

/// Default weight of the rank-fit component.
pub const DEFAULT_RANK_FIT_WEIGHT: f64 = 0.4;
/// Default weight of the hour-headroom component.
pub const DEFAULT_HEADROOM_WEIGHT: f64 = 0.3;
/// Default weight of the balance component.
pub const DEFAULT_BALANCE_WEIGHT: f64 = 0.3;
/// Default tolerance under which two scores tie.
pub const DEFAULT_TIE_EPSILON: f64 = 1e-9;

/// Allowed deviation of the weight sum from 1.0.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;
/// Widest possible rank overshoot (rank 10 against min_rank 1).
const RANK_SPAN: f64 = 9.0;

/// Weights of the three score components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringWeights {
    pub rank_fit: f64,
    pub headroom: f64,
    pub balance: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            rank_fit: DEFAULT_RANK_FIT_WEIGHT,
            headroom: DEFAULT_HEADROOM_WEIGHT,
            balance: DEFAULT_BALANCE_WEIGHT,
        }
    }
}

impl ScoringWeights {
    /// Creates validated weights.
    pub fn new(rank_fit: f64, headroom: f64, balance: f64) -> Result<Self, ConfigError> {
        let weights = Self {
            rank_fit,
            headroom,
            balance,
        };
        weights.validate()?;
        Ok(weights)
    }

    /// Each weight finite and non-negative; the sum within 1e-6 of 1.0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("rank_fit", self.rank_fit),
            ("headroom", self.headroom),
            ("balance", self.balance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        let sum = self.rank_fit + self.headroom + self.balance;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum(sum));
        }
        Ok(())
    }
}

/// 1 for an exact rank match, falling linearly to 0 at the widest overshoot.
pub fn rank_fit(task: &Task, employee: &Employee) -> f64 {
    let overshoot = (employee.rank() - task.min_rank()) as f64;
    (1.0 - overshoot / RANK_SPAN).clamp(0.0, 1.0)
}

/// Share of the budget still free. 0 for a zero budget.
pub fn headroom(employee: &Employee) -> f64 {
    if employee.max_hours() <= 0.0 {
        return 0.0;
    }
    (employee.available_hours() / employee.max_hours()).clamp(0.0, 1.0)
}

/// Share of the budget not yet used by this run. 0 for a zero budget.
pub fn balance(employee: &Employee) -> f64 {
    if employee.max_hours() <= 0.0 {
        return 0.0;
    }
    (1.0 - employee.assigned_hours() / employee.max_hours()).clamp(0.0, 1.0)
}

/// Component scores and their weighted total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub rank_fit: f64,
    pub headroom: f64,
    pub balance: f64,
    pub total: f64,
}

impl ScoreBreakdown {
    /// Scores `employee` for `task`. Pure; no side effects.
    pub fn compute(task: &Task, employee: &Employee, weights: &ScoringWeights) -> Self {
        let rank_fit = rank_fit(task, employee);
        let headroom = headroom(employee);
        let balance = balance(employee);
        let total =
            weights.rank_fit * rank_fit + weights.headroom * headroom + weights.balance * balance;
        Self {
            rank_fit,
            headroom,
            balance,
            total,
        }
    }
}

/// Weighted score of `employee` for `task` (higher is better).
pub fn score(task: &Task, employee: &Employee, weights: &ScoringWeights) -> f64 {
    ScoreBreakdown::compute(task, employee, weights).total
}

/// Orders two scored candidates; `Ordering::Less` means `a` is preferred.
pub fn compare_candidates(
    a: (&Employee, f64),
    b: (&Employee, f64),
    epsilon: f64,
) -> Ordering {
    let (emp_a, score_a) = a;
    let (emp_b, score_b) = b;

    if (score_a - score_b).abs() > epsilon {
        // Higher score first
        return score_b.partial_cmp(&score_a).unwrap_or(Ordering::Equal);
    }

    emp_a
        .assigned_hours()
        .total_cmp(&emp_b.assigned_hours())
        .then_with(|| emp_a.id().cmp(&emp_b.id()))
}

/// Picks the preferred employee among `eligible` (indices into `employees`).
///
/// Returns the winning index and its score breakdown, or `None` if
/// `eligible` is empty.
///
/// # Complexity
/// O(k) for k eligible employees.
pub fn select_best(
    task: &Task,
    employees: &[Employee],
    eligible: &[usize],
    weights: &ScoringWeights,
    epsilon: f64,
) -> Option<(usize, ScoreBreakdown)> {
    let mut best: Option<(usize, ScoreBreakdown)> = None;

    for &idx in eligible {
        let breakdown = ScoreBreakdown::compute(task, &employees[idx], weights);
        best = match best {
            None => Some((idx, breakdown)),
            Some((best_idx, best_breakdown)) => {
                let ord = compare_candidates(
                    (&employees[idx], breakdown.total),
                    (&employees[best_idx], best_breakdown.total),
                    epsilon,
                );
                if ord == Ordering::Less {
                    Some((idx, breakdown))
                } else {
                    Some((best_idx, best_breakdown))
                }
            }
        };
    }

    best
}
