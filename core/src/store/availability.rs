use super::RosterStore;
use crate::{
    error::RosterResult,
    types::{SlotId, UserId},
};
use rusqlite::params;

impl RosterStore {
    // ── Availability ───────────────────────────────────────────

    /// Record a physician's willingness for one slot. At most one row per
    /// (physician, slot) pair; repeated calls overwrite.
    pub fn set_availability(
        &self,
        user_id: &str,
        slot_id: &str,
        available: bool,
    ) -> RosterResult<()> {
        self.conn.execute(
            "INSERT INTO availability (user_id, slot_id, available)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id, slot_id) DO UPDATE SET available = ?3",
            params![user_id, slot_id, if available { 1i32 } else { 0i32 }],
        )?;
        Ok(())
    }

    /// All `available = true` pairs for a period. False rows never reach
    /// the engine.
    pub fn available_pairs_for_period(
        &self,
        period_id: &str,
    ) -> RosterResult<Vec<(SlotId, UserId)>> {
        let mut stmt = self.conn.prepare(
            "SELECT a.slot_id, a.user_id
             FROM availability a
             JOIN slot s ON s.slot_id = a.slot_id
             WHERE s.period_id = ?1 AND a.available = 1
             ORDER BY a.slot_id ASC, a.user_id ASC",
        )?;
        let rows = stmt.query_map(params![period_id], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
