//! Solver tuning configuration.
//!
//! Loaded from a JSON file when one is given; `Default` carries the
//! documented values otherwise. The soft monthly cap is a deliberate
//! tuning knob: do not change its default without revising the contract.

use crate::error::{RosterError, RosterResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Monthly cap applied to physicians with target level 5 or no declared
    /// level. Keeps "as many as possible" physicians from absorbing a whole
    /// month in a single pass; the tiered selection does the rest.
    #[serde(default = "default_soft_monthly_cap")]
    pub soft_monthly_cap: u32,

    /// Score written on every assignment. Placeholder for future weighting.
    #[serde(default = "default_assignment_score")]
    pub assignment_score: f64,
}

fn default_soft_monthly_cap() -> u32 {
    1
}

fn default_assignment_score() -> f64 {
    1.0
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            soft_monthly_cap: default_soft_monthly_cap(),
            assignment_score: default_assignment_score(),
        }
    }
}

impl SolverConfig {
    pub fn from_file(path: &Path) -> RosterResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| RosterError::Config(format!("{}: {e}", path.display())))?;
        let config: SolverConfig = serde_json::from_str(&raw)?;
        if config.soft_monthly_cap == 0 {
            return Err(RosterError::Config(
                "soft_monthly_cap must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }
}
