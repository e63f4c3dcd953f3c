//! Scheduler configuration.
//!
//! All tunable policy lives in [`SchedulerConfig`]: the scoring weights
//! and the tolerance under which two scores tie. Missing fields take the
//! defaults from [`crate::scoring`].
//!
//! ```
//! use u_staffing::config::SchedulerConfig;
//!
//! let config = SchedulerConfig::from_json_str(
//!     r#"{ "weights": { "rank_fit": 0.5, "headroom": 0.25, "balance": 0.25 } }"#,
//! ).unwrap();
//! assert_eq!(config.weights.rank_fit, 0.5);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scoring::{ScoringWeights, DEFAULT_TIE_EPSILON};

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("weight '{name}' must be a finite non-negative number, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("scoring weights must sum to 1.0, got {0}")]
    WeightSum(f64),

    #[error("tie epsilon must be a finite non-negative number, got {0}")]
    InvalidEpsilon(f64),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunable scheduler policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    pub weights: ScoringWeights,
    /// Scores closer than this are treated as equal.
    pub tie_epsilon: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            tie_epsilon: DEFAULT_TIE_EPSILON,
        }
    }
}

impl SchedulerConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        if !self.tie_epsilon.is_finite() || self.tie_epsilon < 0.0 {
            return Err(ConfigError::InvalidEpsilon(self.tie_epsilon));
        }
        Ok(())
    }
}
