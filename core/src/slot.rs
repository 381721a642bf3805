//! Duty slots and their six canonical shapes.
//!
//! Slot generation from calendar rules happens upstream; slots arrive
//! through the store, bulk-inserted at period creation, and are never
//! mutated afterwards. The kind tag is authoritative: a holiday that was
//! generated Sunday-shaped carries a Sunday kind regardless of weekday.

use crate::types::{Month, PeriodId, SlotId};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// The six canonical shift shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    /// Mon-Fri 20:00-24:00.
    WeekdayNight,
    /// Saturday 12:00-18:00.
    SaturdayDay,
    /// Saturday 18:00-24:00.
    SaturdayNight,
    /// Sunday or holiday 08:00-14:00.
    SundayMorning,
    /// Sunday or holiday 14:00-20:00.
    SundayDay,
    /// Sunday or holiday 20:00-24:00.
    SundayNight,
}

impl SlotKind {
    pub const ALL: [SlotKind; 6] = [
        SlotKind::WeekdayNight,
        SlotKind::SaturdayDay,
        SlotKind::SaturdayNight,
        SlotKind::SundayMorning,
        SlotKind::SundayDay,
        SlotKind::SundayNight,
    ];

    /// Stable string form, used as the `kind` column in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            SlotKind::WeekdayNight  => "weekday_night",
            SlotKind::SaturdayDay   => "saturday_day",
            SlotKind::SaturdayNight => "saturday_night",
            SlotKind::SundayMorning => "sunday_morning",
            SlotKind::SundayDay     => "sunday_day",
            SlotKind::SundayNight   => "sunday_night",
        }
    }

    pub fn parse(s: &str) -> Option<SlotKind> {
        SlotKind::ALL.iter().copied().find(|k| k.as_str() == s)
    }

    /// Start and end hour of the shift. End hour 24 means midnight of the
    /// following day.
    pub fn hours(self) -> (u32, u32) {
        match self {
            SlotKind::WeekdayNight  => (20, 24),
            SlotKind::SaturdayDay   => (12, 18),
            SlotKind::SaturdayNight => (18, 24),
            SlotKind::SundayMorning => (8, 14),
            SlotKind::SundayDay     => (14, 20),
            SlotKind::SundayNight   => (20, 24),
        }
    }

    /// The three kinds whose shift spans into the next calendar day.
    pub fn is_night(self) -> bool {
        matches!(
            self,
            SlotKind::WeekdayNight | SlotKind::SaturdayNight | SlotKind::SundayNight
        )
    }

    /// Same three kinds: every night shift here runs until midnight.
    pub fn ends_at_midnight(self) -> bool {
        self.hours().1 == 24
    }

    /// Display order within one day. At most one shape family occurs per
    /// date, so the start hour alone is unambiguous.
    pub fn day_rank(self) -> u32 {
        self.hours().0
    }

    pub fn label(self) -> &'static str {
        match self {
            SlotKind::WeekdayNight  => "weekday 20:00-24:00",
            SlotKind::SaturdayDay   => "Saturday 12:00-18:00",
            SlotKind::SaturdayNight => "Saturday 18:00-24:00",
            SlotKind::SundayMorning => "Sunday 08:00-14:00",
            SlotKind::SundayDay     => "Sunday 14:00-20:00",
            SlotKind::SundayNight   => "Sunday 20:00-24:00",
        }
    }
}

/// A single duty shift. Immutable once generated for a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub id:        SlotId,
    pub period_id: PeriodId,
    pub date:      NaiveDate,
    pub kind:      SlotKind,
    pub start:     NaiveDateTime,
    pub end:       NaiveDateTime,
}

impl Slot {
    /// Build a slot with start/end instants derived from the kind's hours.
    pub fn new(id: SlotId, period_id: PeriodId, date: NaiveDate, kind: SlotKind) -> Self {
        let (start_h, end_h) = kind.hours();
        Self {
            id,
            period_id,
            date,
            kind,
            start: at_hour(date, start_h),
            end:   at_hour(date, end_h),
        }
    }

    /// "YYYY-MM" key for the calendar month this slot belongs to.
    pub fn month(&self) -> Month {
        self.date.format("%Y-%m").to_string()
    }

    pub fn is_night(&self) -> bool {
        self.kind.is_night()
    }

    pub fn ends_at_midnight(&self) -> bool {
        self.kind.ends_at_midnight()
    }
}

/// Instant at `hour` o'clock on `date`; hour 24 rolls over to midnight of
/// the next day.
fn at_hour(date: NaiveDate, hour: u32) -> NaiveDateTime {
    if hour == 24 {
        date.succ_opt().unwrap_or(date).and_time(NaiveTime::MIN)
    } else {
        date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN))
    }
}
