//! Store semantics: atomic replace, preview isolation, idempotent period
//! creation, cascade delete.

use chrono::NaiveDate;
use roster_core::{
    config::SolverConfig,
    engine::RosterEngine,
    error::RosterError,
    period::Period,
    slot::{Slot, SlotKind},
    solver::Assignment,
    store::RosterStore,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn period(id: &str, label: &str) -> Period {
    Period {
        id:        id.to_string(),
        label:     label.to_string(),
        starts_on: date(2026, 7, 1),
        ends_on:   date(2026, 9, 30),
    }
}

fn migrated_store() -> RosterStore {
    let store = RosterStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    store
}

fn assignment(slot_id: &str, user_id: &str) -> Assignment {
    Assignment {
        slot_id: slot_id.to_string(),
        user_id: user_id.to_string(),
        score:   1.0,
    }
}

#[test]
fn period_creation_is_idempotent_by_label() {
    let store = migrated_store();

    assert!(store.insert_period_if_absent(&period("p1", "2026-Q3")).unwrap());
    // Same label, different id: skipped, original untouched.
    assert!(!store.insert_period_if_absent(&period("p2", "2026-Q3")).unwrap());

    assert!(store.get_period("p1").unwrap().is_some());
    assert!(store.get_period("p2").unwrap().is_none());
    let found = store.find_period_by_label("2026-Q3").unwrap().unwrap();
    assert_eq!(found.id, "p1");
}

#[test]
fn replace_assignments_replaces_never_merges() {
    let store = migrated_store();
    store.insert_period_if_absent(&period("p1", "2026-Q3")).unwrap();
    store
        .insert_slots(&[
            Slot::new("s1".into(), "p1".into(), date(2026, 7, 6), SlotKind::WeekdayNight),
            Slot::new("s2".into(), "p1".into(), date(2026, 7, 7), SlotKind::WeekdayNight),
        ])
        .unwrap();

    store
        .replace_assignments("p1", &[assignment("s1", "u-ann"), assignment("s2", "u-bea")])
        .unwrap();
    store
        .replace_assignments("p1", &[assignment("s2", "u-cho")])
        .unwrap();

    let rows = store.assignments_for_period("p1").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].slot_id, "s2");
    assert_eq!(rows[0].user_id, "u-cho");
}

#[test]
fn replace_with_empty_clears_the_period() {
    let store = migrated_store();
    store.insert_period_if_absent(&period("p1", "2026-Q3")).unwrap();
    store
        .insert_slots(&[Slot::new(
            "s1".into(),
            "p1".into(),
            date(2026, 7, 6),
            SlotKind::WeekdayNight,
        )])
        .unwrap();

    store.replace_assignments("p1", &[assignment("s1", "u-ann")]).unwrap();
    store.replace_assignments("p1", &[]).unwrap();

    assert!(store.assignments_for_period("p1").unwrap().is_empty());
}

#[test]
fn preview_never_writes_assignments() {
    let store = migrated_store();
    store.insert_period_if_absent(&period("p1", "2026-Q3")).unwrap();
    store
        .insert_slots(&[Slot::new(
            "s1".into(),
            "p1".into(),
            date(2026, 7, 6),
            SlotKind::WeekdayNight,
        )])
        .unwrap();
    store.set_availability("u-ann", "s1", true).unwrap();

    let engine = RosterEngine::new(store, SolverConfig::default());
    let report = engine.preview("p1").expect("preview");

    assert!(report.dry_run);
    assert_eq!(report.assignment_count, 1);
    assert!(engine.store().assignments_for_period("p1").unwrap().is_empty());
}

#[test]
fn commit_on_zero_slot_period_yields_empty_roster() {
    let store = migrated_store();
    store.insert_period_if_absent(&period("p1", "2026-Q3")).unwrap();

    let engine = RosterEngine::new(store, SolverConfig::default());
    let report = engine.commit("p1").expect("commit");

    assert_eq!(report.assignment_count, 0);
    assert_eq!(report.hole_count, 0);
    assert!(engine.store().assignments_for_period("p1").unwrap().is_empty());
}

#[test]
fn missing_period_is_an_error_not_an_empty_result() {
    let store = migrated_store();
    let engine = RosterEngine::new(store, SolverConfig::default());

    let err = engine.preview("nope").unwrap_err();
    assert!(matches!(err, RosterError::PeriodNotFound { .. }));
}

#[test]
fn deleting_a_period_cascades_to_everything_under_it() {
    let store = migrated_store();
    store.insert_period_if_absent(&period("p1", "2026-Q3")).unwrap();
    store
        .insert_slots(&[Slot::new(
            "s1".into(),
            "p1".into(),
            date(2026, 7, 6),
            SlotKind::WeekdayNight,
        )])
        .unwrap();
    store.set_availability("u-ann", "s1", true).unwrap();
    store.set_target_level("u-ann", "p1", Some(2)).unwrap();
    store.set_month_target("u-ann", "p1", "2026-07", 2).unwrap();
    store.replace_assignments("p1", &[assignment("s1", "u-ann")]).unwrap();

    store.delete_period("p1").unwrap();

    assert!(store.get_period("p1").unwrap().is_none());
    assert!(store.slots_for_period("p1").unwrap().is_empty());
    assert!(store.available_pairs_for_period("p1").unwrap().is_empty());
    assert!(store.target_levels_for_period("p1").unwrap().is_empty());
    assert!(store.month_targets_for_period("p1").unwrap().is_empty());
    assert!(store.assignments_for_period("p1").unwrap().is_empty());
}

#[test]
fn availability_upsert_keeps_one_row_per_pair() {
    let store = migrated_store();
    store.insert_period_if_absent(&period("p1", "2026-Q3")).unwrap();
    store
        .insert_slots(&[Slot::new(
            "s1".into(),
            "p1".into(),
            date(2026, 7, 6),
            SlotKind::WeekdayNight,
        )])
        .unwrap();

    store.set_availability("u-ann", "s1", true).unwrap();
    store.set_availability("u-ann", "s1", true).unwrap();

    let pairs = store.available_pairs_for_period("p1").unwrap();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0], ("s1".to_string(), "u-ann".to_string()));
}

#[test]
fn slots_round_trip_with_their_kind_and_instants() {
    let store = migrated_store();
    store.insert_period_if_absent(&period("p1", "2026-Q3")).unwrap();
    let original = Slot::new(
        "s1".into(),
        "p1".into(),
        date(2026, 7, 11),
        SlotKind::SaturdayNight,
    );
    store.insert_slots(&[original.clone()]).unwrap();

    let loaded = &store.slots_for_period("p1").unwrap()[0];
    assert_eq!(loaded.kind, SlotKind::SaturdayNight);
    assert_eq!(loaded.date, original.date);
    assert_eq!(loaded.start, original.start);
    // Ends at midnight: the end instant lands on the next calendar day.
    assert_eq!(loaded.end, date(2026, 7, 12).and_hms_opt(0, 0, 0).unwrap());
}
