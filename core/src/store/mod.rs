//! SQLite persistence gateway.
//!
//! RULE: Only the store talks to the database.
//! Engine, summary, and reporting call store methods — they never execute
//! SQL directly.

mod assignment;
mod availability;
mod period;
mod preference;
mod slot;

use crate::{error::RosterResult, types::UserId};
use rusqlite::{params, Connection};
use std::collections::BTreeMap;

pub struct RosterStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl RosterStore {
    pub fn open(path: &str) -> RosterResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> RosterResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn, path: None })
    }

    /// Reopen a new connection to the same database.
    /// For in-memory databases this returns a fresh, isolated database.
    pub fn reopen(&self) -> RosterResult<Self> {
        match &self.path {
            Some(p) => Self::open(p),
            None => Self::in_memory(),
        }
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> RosterResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_roster.sql"))?;
        Ok(())
    }

    // ── Physician profile projection ───────────────────────────

    pub fn upsert_physician(
        &self,
        user_id: &str,
        name: &str,
        email: Option<&str>,
    ) -> RosterResult<()> {
        self.conn.execute(
            "INSERT INTO physician (user_id, name, email) VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id) DO UPDATE SET name = ?2, email = ?3",
            params![user_id, name, email],
        )?;
        Ok(())
    }

    pub fn physician_names(&self) -> RosterResult<BTreeMap<UserId, String>> {
        let mut stmt = self.conn.prepare("SELECT user_id, name FROM physician")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        rows.collect::<Result<BTreeMap<_, _>, _>>().map_err(Into::into)
    }

    pub fn physician_email(&self, user_id: &str) -> RosterResult<Option<String>> {
        use rusqlite::OptionalExtension;
        self.conn
            .query_row(
                "SELECT email FROM physician WHERE user_id = ?1",
                params![user_id],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()
            .map(Option::flatten)
            .map_err(Into::into)
    }
}
