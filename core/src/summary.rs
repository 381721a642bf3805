//! Availability summary for a duty period.
//!
//! Pure read/aggregation: one snapshot of slots, per-slot candidate sets,
//! and per-physician metrics, captured before the solver runs and never
//! refreshed mid-pass.

use crate::{
    error::RosterResult,
    slot::Slot,
    store::RosterStore,
    types::{Month, PeriodId, UserId},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicianInfo {
    pub name:         String,
    /// Declared target level (1-4 hard monthly cap, 5 = soft max).
    /// None when the physician never declared one.
    pub target_level: Option<u8>,
    /// Number of slots this physician marked available, raw.
    pub avail_count:  u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotCandidates {
    pub slot: Slot,
    /// Physician ids with `available = true`, sorted ascending.
    pub candidates: Vec<UserId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub period_id:  PeriodId,
    /// Slots ordered by start instant (then id).
    pub slots:      Vec<SlotCandidates>,
    /// Union of physicians available on any slot and physicians with a
    /// declared preference for the period. A physician who declared a
    /// target but is available nowhere still appears, with avail_count 0.
    pub physicians: BTreeMap<UserId, PhysicianInfo>,
}

impl PeriodSummary {
    /// Capture the period's snapshot. A period with zero slots yields
    /// empty structures, not an error.
    pub fn load(store: &RosterStore, period_id: &str) -> RosterResult<Self> {
        let slots = store.slots_for_period(period_id)?;
        let pairs = store.available_pairs_for_period(period_id)?;
        let levels = store.target_levels_for_period(period_id)?;
        let names = store.physician_names()?;

        let mut by_slot: BTreeMap<&str, Vec<UserId>> = BTreeMap::new();
        let mut avail_counts: BTreeMap<UserId, u32> = BTreeMap::new();
        for (slot_id, user_id) in &pairs {
            by_slot
                .entry(slot_id.as_str())
                .or_default()
                .push(user_id.clone());
            *avail_counts.entry(user_id.clone()).or_insert(0) += 1;
        }

        let mut physicians: BTreeMap<UserId, PhysicianInfo> = BTreeMap::new();
        let universe = avail_counts
            .keys()
            .chain(levels.keys())
            .cloned()
            .collect::<std::collections::BTreeSet<_>>();
        for user_id in universe {
            let name = names
                .get(&user_id)
                .cloned()
                .unwrap_or_else(|| user_id.clone());
            physicians.insert(
                user_id.clone(),
                PhysicianInfo {
                    name,
                    target_level: levels.get(&user_id).copied().flatten(),
                    avail_count:  avail_counts.get(&user_id).copied().unwrap_or(0),
                },
            );
        }

        let slots = slots
            .into_iter()
            .map(|slot| {
                let candidates = by_slot.remove(slot.id.as_str()).unwrap_or_default();
                SlotCandidates { slot, candidates }
            })
            .collect();

        Ok(Self {
            period_id: period_id.to_string(),
            slots,
            physicians,
        })
    }

    /// Distinct months spanned by the period's slots, chronological.
    pub fn months(&self) -> Vec<Month> {
        self.slots
            .iter()
            .map(|sc| sc.slot.month())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Raw availability counts per physician per month.
    pub fn monthly_availability(&self) -> BTreeMap<UserId, BTreeMap<Month, u32>> {
        let mut out: BTreeMap<UserId, BTreeMap<Month, u32>> = BTreeMap::new();
        for sc in &self.slots {
            let month = sc.slot.month();
            for user_id in &sc.candidates {
                *out.entry(user_id.clone())
                    .or_default()
                    .entry(month.clone())
                    .or_insert(0) += 1;
            }
        }
        out
    }
}
