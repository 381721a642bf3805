use super::RosterStore;
use crate::{error::RosterResult, period::Period};
use rusqlite::{params, OptionalExtension};

fn period_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<Period> {
    Ok(Period {
        id:        row.get(0)?,
        label:     row.get(1)?,
        starts_on: row.get(2)?,
        ends_on:   row.get(3)?,
    })
}

impl RosterStore {
    // ── Period ─────────────────────────────────────────────────

    /// Insert a period unless one with the same label already exists.
    /// Returns true if the period was inserted. Period creation is
    /// triggered externally (cron) and must be idempotent by label.
    pub fn insert_period_if_absent(&self, period: &Period) -> RosterResult<bool> {
        if self.find_period_by_label(&period.label)?.is_some() {
            log::debug!(
                "period '{}' already exists, skipping create",
                period.label
            );
            return Ok(false);
        }
        self.conn.execute(
            "INSERT INTO period (period_id, label, starts_on, ends_on)
             VALUES (?1, ?2, ?3, ?4)",
            params![period.id, period.label, period.starts_on, period.ends_on],
        )?;
        Ok(true)
    }

    pub fn get_period(&self, period_id: &str) -> RosterResult<Option<Period>> {
        self.conn
            .query_row(
                "SELECT period_id, label, starts_on, ends_on
                 FROM period WHERE period_id = ?1",
                params![period_id],
                period_row_mapper,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn find_period_by_label(&self, label: &str) -> RosterResult<Option<Period>> {
        self.conn
            .query_row(
                "SELECT period_id, label, starts_on, ends_on
                 FROM period WHERE label = ?1",
                params![label],
                period_row_mapper,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Delete a period and, through cascades, its slots, availability and
    /// assignments. The only way slots ever disappear.
    pub fn delete_period(&self, period_id: &str) -> RosterResult<()> {
        self.conn.execute(
            "DELETE FROM period WHERE period_id = ?1",
            params![period_id],
        )?;
        Ok(())
    }
}
