//! Planning period.
//!
//! Every schedule covers one fixed two-week window. Employee hour budgets
//! are per window.

use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of a planning window in days (start and end inclusive).
pub const PERIOD_DAYS: u64 = 14;

/// A two-week planning window `[start, end]`, both dates inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl PlanningPeriod {
    /// The window starting on `start`.
    pub fn starting(start: NaiveDate) -> Self {
        let end = start
            .checked_add_days(Days::new(PERIOD_DAYS - 1))
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    /// The window starting today (UTC).
    pub fn current() -> Self {
        Self::starting(Utc::now().date_naive())
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl Default for PlanningPeriod {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for PlanningPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}
