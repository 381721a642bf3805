//! The assignment engine: a deterministic, greedy, tiered solver.
//!
//! RULES:
//!   - Months are processed chronologically; the pass is forward-only.
//!   - Within a month, slots go scarcest-first: raw candidate count of
//!     at most 1, then exactly 2, then 3 or more.
//!   - Within a bucket, slots go in chronological start order.
//!   - A hole is final. No backtracking, no retries.
//!   - Identical input must produce byte-identical output.
//!
//! The greedy single pass is the defined contract: explainable and fast,
//! at the cost that adversarial availability patterns can produce holes an
//! exhaustive matching formulation would avoid. Upgrading to a flow-based
//! solver would change observable behavior and needs an explicit contract
//! revision first.

use crate::{
    config::SolverConfig,
    quota::QuotaSet,
    slot::{Slot, SlotKind},
    summary::PeriodSummary,
    types::{Month, SlotId, UserId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub slot_id: SlotId,
    pub user_id: UserId,
    /// Fixed at the configured score for every assignment; a placeholder
    /// for future weighting.
    pub score:   f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    pub slot_id: SlotId,
    pub date:    NaiveDate,
    pub kind:    SlotKind,
    /// Raw availability count for the slot, before quota and adjacency
    /// filtering. Zero means truly nobody volunteered; positive means
    /// candidates existed but every one was excluded by the rules.
    pub candidate_count: u32,
}

#[derive(Debug, Clone, Default)]
pub struct SolverOutcome {
    pub assignments: Vec<Assignment>,
    pub holes:       Vec<Hole>,
}

/// Mutable counters for one solver invocation. Owned by `solve`, never
/// shared, dropped when the pass ends.
#[derive(Debug, Default)]
struct SolverState {
    assigned_month: BTreeMap<UserId, BTreeMap<Month, u32>>,
    assigned_total: BTreeMap<UserId, u32>,
    days_taken:     BTreeMap<UserId, BTreeSet<NaiveDate>>,
    night_dates:    BTreeMap<UserId, BTreeSet<NaiveDate>>,
    midnight_ends:  BTreeMap<UserId, BTreeSet<NaiveDate>>,
    morning_dates:  BTreeMap<UserId, BTreeSet<NaiveDate>>,
}

impl SolverState {
    fn total(&self, user_id: &str) -> u32 {
        self.assigned_total.get(user_id).copied().unwrap_or(0)
    }

    fn in_month(&self, user_id: &str, month: &str) -> u32 {
        self.assigned_month
            .get(user_id)
            .and_then(|m| m.get(month))
            .copied()
            .unwrap_or(0)
    }

    fn has_date(
        set: &BTreeMap<UserId, BTreeSet<NaiveDate>>,
        user_id: &str,
        date: Option<NaiveDate>,
    ) -> bool {
        match (set.get(user_id), date) {
            (Some(dates), Some(date)) => dates.contains(&date),
            _ => false,
        }
    }

    /// Hard-constraint check for one candidate against one slot.
    ///
    /// Adjacency is checked in both directions: scarcity buckets process
    /// slots out of date order inside a month, so the D+1 slot may already
    /// be committed when the D slot comes up.
    fn eligible(&self, user_id: &str, slot: &Slot, month: &Month, quotas: &QuotaSet) -> bool {
        if self.in_month(user_id, month) >= quotas.monthly_cap(user_id, month) {
            return false;
        }
        if self.total(user_id) >= quotas.total_cap(user_id) {
            return false;
        }
        // Same-day exclusivity: one duty per physician per date.
        if Self::has_date(&self.days_taken, user_id, Some(slot.date)) {
            return false;
        }
        let prev = slot.date.pred_opt();
        let next = slot.date.succ_opt();
        // No night shift on the day after (or before) another night shift.
        if slot.is_night()
            && (Self::has_date(&self.night_dates, user_id, prev)
                || Self::has_date(&self.night_dates, user_id, next))
        {
            return false;
        }
        // A shift ending at midnight on D rules out the Sunday morning
        // shift on D+1, whichever of the two is committed first.
        if slot.kind == SlotKind::SundayMorning
            && Self::has_date(&self.midnight_ends, user_id, prev)
        {
            return false;
        }
        if slot.ends_at_midnight() && Self::has_date(&self.morning_dates, user_id, next) {
            return false;
        }
        true
    }

    fn commit(&mut self, user_id: &UserId, slot: &Slot, month: &Month) {
        *self
            .assigned_month
            .entry(user_id.clone())
            .or_default()
            .entry(month.clone())
            .or_insert(0) += 1;
        *self.assigned_total.entry(user_id.clone()).or_insert(0) += 1;
        self.days_taken
            .entry(user_id.clone())
            .or_default()
            .insert(slot.date);
        if slot.is_night() {
            self.night_dates
                .entry(user_id.clone())
                .or_default()
                .insert(slot.date);
        }
        if slot.ends_at_midnight() {
            self.midnight_ends
                .entry(user_id.clone())
                .or_default()
                .insert(slot.date);
        }
        if slot.kind == SlotKind::SundayMorning {
            self.morning_dates
                .entry(user_id.clone())
                .or_default()
                .insert(slot.date);
        }
    }
}

/// One forward pass over the period's slots.
pub fn solve(summary: &PeriodSummary, quotas: &QuotaSet, config: &SolverConfig) -> SolverOutcome {
    let mut state = SolverState::default();
    let mut outcome = SolverOutcome::default();

    // Group slot indices by month. Within a group the indices keep the
    // summary's chronological order.
    let mut by_month: BTreeMap<Month, Vec<usize>> = BTreeMap::new();
    for (idx, sc) in summary.slots.iter().enumerate() {
        by_month.entry(sc.slot.month()).or_default().push(idx);
    }

    for (month, indices) in &by_month {
        // Scarcity buckets on the RAW candidate count: slots with the
        // fewest possible fillers lock in before flexible slots consume
        // shared candidates.
        let buckets: [Vec<usize>; 3] = [
            bucket(summary, indices, |n| n <= 1),
            bucket(summary, indices, |n| n == 2),
            bucket(summary, indices, |n| n >= 3),
        ];

        for bucket_indices in &buckets {
            for &idx in bucket_indices {
                let sc = &summary.slots[idx];
                let chosen = sc
                    .candidates
                    .iter()
                    .filter(|u| state.eligible(u.as_str(), &sc.slot, month, quotas))
                    .min_by_key(|u| selection_key(summary, &state, u.as_str()));

                match chosen {
                    Some(user_id) => {
                        state.commit(user_id, &sc.slot, month);
                        outcome.assignments.push(Assignment {
                            slot_id: sc.slot.id.clone(),
                            user_id: user_id.clone(),
                            score:   config.assignment_score,
                        });
                    }
                    None => {
                        log::debug!(
                            "period={} solver: hole at {} {} ({} raw candidates)",
                            summary.period_id,
                            sc.slot.date,
                            sc.slot.kind.as_str(),
                            sc.candidates.len(),
                        );
                        outcome.holes.push(Hole {
                            slot_id: sc.slot.id.clone(),
                            date:    sc.slot.date,
                            kind:    sc.slot.kind,
                            candidate_count: sc.candidates.len() as u32,
                        });
                    }
                }
            }
        }
    }

    outcome
}

fn bucket(summary: &PeriodSummary, indices: &[usize], pick: impl Fn(usize) -> bool) -> Vec<usize> {
    indices
        .iter()
        .copied()
        .filter(|&idx| pick(summary.slots[idx].candidates.len()))
        .collect()
}

/// Fairness tier key: fewest total assignments first (implicit round
/// robin), then fewest raw availabilities (rarer physicians have fewer
/// future chances), then name, then id for full determinism.
fn selection_key(
    summary: &PeriodSummary,
    state: &SolverState,
    user_id: &str,
) -> (u32, u32, String, String) {
    let info = summary.physicians.get(user_id);
    (
        state.total(user_id),
        info.map(|i| i.avail_count).unwrap_or(0),
        info.map(|i| i.name.clone()).unwrap_or_default(),
        user_id.to_string(),
    )
}
