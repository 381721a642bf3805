use super::RosterStore;
use crate::{
    error::RosterResult,
    types::{Month, UserId},
};
use rusqlite::params;
use std::collections::BTreeMap;

impl RosterStore {
    // ── Preference ─────────────────────────────────────────────

    /// Declare a physician's target level for a period (1-4 hard monthly
    /// cap, 5 = "as many as possible", None = undeclared).
    pub fn set_target_level(
        &self,
        user_id: &str,
        period_id: &str,
        target_level: Option<u8>,
    ) -> RosterResult<()> {
        self.conn.execute(
            "INSERT INTO preference (user_id, period_id, target_level)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id, period_id) DO UPDATE SET target_level = ?3",
            params![user_id, period_id, target_level.map(i64::from)],
        )?;
        Ok(())
    }

    pub fn target_levels_for_period(
        &self,
        period_id: &str,
    ) -> RosterResult<BTreeMap<UserId, Option<u8>>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, target_level FROM preference WHERE period_id = ?1",
        )?;
        let rows = stmt.query_map(params![period_id], |row| {
            let level: Option<i64> = row.get(1)?;
            Ok((row.get::<_, UserId>(0)?, level.map(|l| l as u8)))
        })?;
        rows.collect::<Result<BTreeMap<_, _>, _>>().map_err(Into::into)
    }

    /// Explicit per-month target for one physician. Overrides the derived
    /// quota wholesale once any month's target is positive.
    pub fn set_month_target(
        &self,
        user_id: &str,
        period_id: &str,
        month: &str,
        target_total: u32,
    ) -> RosterResult<()> {
        self.conn.execute(
            "INSERT INTO month_target (user_id, period_id, month, target_total)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id, period_id, month) DO UPDATE SET target_total = ?4",
            params![user_id, period_id, month, target_total],
        )?;
        Ok(())
    }

    pub fn month_targets_for_period(
        &self,
        period_id: &str,
    ) -> RosterResult<BTreeMap<UserId, BTreeMap<Month, u32>>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, month, target_total
             FROM month_target WHERE period_id = ?1",
        )?;
        let rows = stmt.query_map(params![period_id], |row| {
            Ok((
                row.get::<_, UserId>(0)?,
                row.get::<_, Month>(1)?,
                row.get::<_, i64>(2)? as u32,
            ))
        })?;
        let mut out: BTreeMap<UserId, BTreeMap<Month, u32>> = BTreeMap::new();
        for row in rows {
            let (user_id, month, target) = row?;
            out.entry(user_id).or_default().insert(month, target);
        }
        Ok(out)
    }
}
