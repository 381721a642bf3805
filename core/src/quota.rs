//! Quota resolution: declared preferences to concrete monthly caps.
//!
//! Everything soft or sentinel-valued is resolved here, once, before the
//! solver runs. The solver only ever sees concrete numbers; it never
//! branches on "is this a soft cap".

use crate::{
    config::SolverConfig,
    summary::PeriodSummary,
    types::{Month, UserId},
};
use std::collections::BTreeMap;

/// How one physician's cap is determined for the period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotaSpec {
    /// Explicit per-month targets declared for the period. Replaces the
    /// derived cap wholesale; months not listed get 0.
    Explicit(BTreeMap<Month, u32>),
    /// Uniform monthly cap derived from the declared target level.
    Derived { basis: u32 },
}

/// Resolved caps: physician to month to cap, plus the quarter total
/// (sum over months). Missing entries read as 0.
#[derive(Debug, Clone, Default)]
pub struct QuotaSet {
    pub per_month: BTreeMap<UserId, BTreeMap<Month, u32>>,
    pub total:     BTreeMap<UserId, u32>,
}

impl QuotaSet {
    pub fn monthly_cap(&self, user_id: &str, month: &str) -> u32 {
        self.per_month
            .get(user_id)
            .and_then(|m| m.get(month))
            .copied()
            .unwrap_or(0)
    }

    pub fn total_cap(&self, user_id: &str) -> u32 {
        self.total.get(user_id).copied().unwrap_or(0)
    }
}

/// Pick the quota spec for one physician.
///
/// Levels 1-4 are hard monthly caps of that many shifts. Level 5 and
/// undeclared both map to the configured soft monthly cap: "as many as
/// possible" physicians are spread evenly rather than absorbing a whole
/// month in one pass.
pub fn spec_for(
    target_level: Option<u8>,
    month_overrides: Option<&BTreeMap<Month, u32>>,
    config: &SolverConfig,
) -> QuotaSpec {
    if let Some(overrides) = month_overrides {
        if overrides.values().any(|&t| t > 0) {
            return QuotaSpec::Explicit(overrides.clone());
        }
    }
    match target_level {
        Some(level @ 1..=4) => QuotaSpec::Derived {
            basis: u32::from(level),
        },
        _ => QuotaSpec::Derived {
            basis: config.soft_monthly_cap,
        },
    }
}

/// Resolve every physician's spec into concrete monthly and total caps.
///
/// Derived caps are forced to 0 for months where the physician has zero
/// raw availability: unavailable all month means unassignable all month,
/// whatever the declared level says.
pub fn resolve_quotas(
    summary: &PeriodSummary,
    month_targets: &BTreeMap<UserId, BTreeMap<Month, u32>>,
    config: &SolverConfig,
) -> QuotaSet {
    let months = summary.months();
    let monthly_avail = summary.monthly_availability();

    let mut quotas = QuotaSet::default();
    for (user_id, info) in &summary.physicians {
        let spec = spec_for(info.target_level, month_targets.get(user_id), config);

        let mut caps: BTreeMap<Month, u32> = BTreeMap::new();
        for month in &months {
            let cap = match &spec {
                QuotaSpec::Explicit(targets) => {
                    targets.get(month).copied().unwrap_or(0)
                }
                QuotaSpec::Derived { basis } => {
                    let available = monthly_avail
                        .get(user_id)
                        .and_then(|m| m.get(month))
                        .copied()
                        .unwrap_or(0);
                    if available == 0 {
                        0
                    } else {
                        *basis
                    }
                }
            };
            caps.insert(month.clone(), cap);
        }

        let total: u32 = caps.values().sum();
        quotas.per_month.insert(user_id.clone(), caps);
        quotas.total.insert(user_id.clone(), total);
    }
    quotas
}
