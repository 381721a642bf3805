use super::RosterStore;
use crate::{
    error::RosterResult,
    slot::{Slot, SlotKind},
};
use rusqlite::params;

fn slot_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<Slot> {
    let kind_s: String = row.get(3)?;
    let kind = SlotKind::parse(&kind_s).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("unknown slot kind '{kind_s}'").into(),
        )
    })?;
    Ok(Slot {
        id:        row.get(0)?,
        period_id: row.get(1)?,
        date:      row.get(2)?,
        kind,
        start:     row.get(4)?,
        end:       row.get(5)?,
    })
}

impl RosterStore {
    // ── Slot ───────────────────────────────────────────────────

    /// Bulk-insert the slots of a freshly created period, atomically.
    /// Slots are immutable afterwards.
    pub fn insert_slots(&self, slots: &[Slot]) -> RosterResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO slot (slot_id, period_id, date, kind, start_at, end_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for slot in slots {
                stmt.execute(params![
                    slot.id,
                    slot.period_id,
                    slot.date,
                    slot.kind.as_str(),
                    slot.start,
                    slot.end,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// All slots of a period, ordered by start instant (then id for full
    /// determinism).
    pub fn slots_for_period(&self, period_id: &str) -> RosterResult<Vec<Slot>> {
        let mut stmt = self.conn.prepare(
            "SELECT slot_id, period_id, date, kind, start_at, end_at
             FROM slot WHERE period_id = ?1
             ORDER BY start_at ASC, slot_id ASC",
        )?;
        let rows = stmt.query_map(params![period_id], slot_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
