use super::RosterStore;
use crate::{error::RosterResult, solver::Assignment};
use rusqlite::params;

fn assignment_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<Assignment> {
    Ok(Assignment {
        slot_id: row.get(0)?,
        user_id: row.get(1)?,
        score:   row.get(2)?,
    })
}

impl RosterStore {
    // ── Assignment ─────────────────────────────────────────────

    /// Replace every persisted assignment for a period with `rows`, as one
    /// transaction. A failed insert rolls the delete back too; partial
    /// writes are never left behind.
    pub fn replace_assignments(
        &self,
        period_id: &str,
        rows: &[Assignment],
    ) -> RosterResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM assignment WHERE period_id = ?1",
            params![period_id],
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO assignment (slot_id, period_id, user_id, score)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for a in rows {
                stmt.execute(params![a.slot_id, period_id, a.user_id, a.score])?;
            }
        }
        tx.commit()?;
        log::info!(
            "period={period_id} store: replaced assignments ({} rows)",
            rows.len()
        );
        Ok(())
    }

    pub fn assignments_for_period(&self, period_id: &str) -> RosterResult<Vec<Assignment>> {
        let mut stmt = self.conn.prepare(
            "SELECT slot_id, user_id, score
             FROM assignment WHERE period_id = ?1
             ORDER BY slot_id ASC",
        )?;
        let rows = stmt.query_map(params![period_id], assignment_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
