//! Engine orchestration: one snapshot in, one report out.
//!
//! RULES:
//!   - Preview and commit share the identical computation path, so the
//!     preview always predicts the committed result.
//!   - All reads happen before the pass starts (read-then-compute); the
//!     only write is the commit's atomic replace.
//!   - Unfillable slots are data (holes), never errors. The engine fails
//!     only on invalid input or store I/O.

use crate::{
    config::SolverConfig,
    error::{RosterError, RosterResult},
    quota::resolve_quotas,
    report::RunReport,
    solver::{solve, Assignment},
    store::RosterStore,
    summary::PeriodSummary,
};

pub struct RosterEngine {
    store:  RosterStore,
    config: SolverConfig,
}

impl RosterEngine {
    pub fn new(store: RosterStore, config: SolverConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &RosterStore {
        &self.store
    }

    /// Compute a full assignment for the period without touching persisted
    /// state.
    pub fn preview(&self, period_id: &str) -> RosterResult<RunReport> {
        self.run(period_id, true)
    }

    /// Compute a full assignment, then atomically replace the period's
    /// persisted assignments with the result.
    pub fn commit(&self, period_id: &str) -> RosterResult<RunReport> {
        let report = self.run(period_id, false)?;
        let rows: Vec<Assignment> = report
            .assignments
            .iter()
            .map(|row| Assignment {
                slot_id: row.slot_id.clone(),
                user_id: row.user_id.clone(),
                score:   row.score,
            })
            .collect();
        self.store.replace_assignments(period_id, &rows)?;
        Ok(report)
    }

    fn run(&self, period_id: &str, dry_run: bool) -> RosterResult<RunReport> {
        let period = self
            .store
            .get_period(period_id)?
            .ok_or_else(|| RosterError::PeriodNotFound {
                period_id: period_id.to_string(),
            })?;

        let run_id = uuid::Uuid::new_v4().to_string();
        let summary = PeriodSummary::load(&self.store, period_id)?;
        let month_targets = self.store.month_targets_for_period(period_id)?;
        let quotas = resolve_quotas(&summary, &month_targets, &self.config);
        let outcome = solve(&summary, &quotas, &self.config);

        let report = RunReport::build(run_id, dry_run, &summary, outcome);
        log::info!(
            "period={} run={} engine: '{}' {} slots, {} assignments, {} holes (dry_run={dry_run})",
            report.period_id,
            report.run_id,
            period.label,
            summary.slots.len(),
            report.assignment_count,
            report.hole_count,
        );
        Ok(report)
    }
}
