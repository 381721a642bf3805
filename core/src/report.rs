//! Final run payload: the assignment list enriched for display, plus the
//! holes with their diagnostic candidate counts.

use crate::{
    slot::SlotKind,
    solver::{Hole, SolverOutcome},
    summary::PeriodSummary,
    types::{PeriodId, RunId, SlotId, UserId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRow {
    pub slot_id:   SlotId,
    pub date:      NaiveDate,
    pub kind:      SlotKind,
    pub user_id:   UserId,
    /// Resolved display name; falls back to the id for unknown physicians.
    pub physician: String,
    pub score:     f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id:           RunId,
    pub period_id:        PeriodId,
    pub dry_run:          bool,
    pub assignment_count: usize,
    pub hole_count:       usize,
    /// Sorted by (date, shift order within the day).
    pub assignments: Vec<AssignmentRow>,
    /// Sorted the same way. A positive candidate_count flags a hole where
    /// people were available but excluded by the rules, which usually
    /// means a manual override is viable.
    pub holes: Vec<Hole>,
}

impl RunReport {
    pub fn build(
        run_id: RunId,
        dry_run: bool,
        summary: &PeriodSummary,
        outcome: SolverOutcome,
    ) -> Self {
        let slots: BTreeMap<&str, &crate::slot::Slot> = summary
            .slots
            .iter()
            .map(|sc| (sc.slot.id.as_str(), &sc.slot))
            .collect();

        let mut assignments: Vec<AssignmentRow> = outcome
            .assignments
            .into_iter()
            .filter_map(|a| {
                let slot = slots.get(a.slot_id.as_str())?;
                let physician = summary
                    .physicians
                    .get(&a.user_id)
                    .map(|info| info.name.clone())
                    .unwrap_or_else(|| a.user_id.clone());
                Some(AssignmentRow {
                    slot_id: a.slot_id,
                    date:    slot.date,
                    kind:    slot.kind,
                    user_id: a.user_id,
                    physician,
                    score:   a.score,
                })
            })
            .collect();
        assignments.sort_by(|a, b| {
            (a.date, a.kind.day_rank(), &a.slot_id).cmp(&(b.date, b.kind.day_rank(), &b.slot_id))
        });

        let mut holes = outcome.holes;
        holes.sort_by(|a, b| {
            (a.date, a.kind.day_rank(), &a.slot_id).cmp(&(b.date, b.kind.day_rank(), &b.slot_id))
        });

        Self {
            run_id,
            period_id: summary.period_id.clone(),
            dry_run,
            assignment_count: assignments.len(),
            hole_count: holes.len(),
            assignments,
            holes,
        }
    }
}
