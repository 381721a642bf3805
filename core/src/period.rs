//! A duty period: one quarter-long scheduling window.

use crate::types::PeriodId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Period {
    pub id:        PeriodId,
    /// Human label, e.g. "2026-Q3". Period creation is idempotent by label:
    /// a second create with the same label is a no-op.
    pub label:     String,
    pub starts_on: NaiveDate,
    pub ends_on:   NaiveDate,
}
