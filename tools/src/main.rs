//! roster-runner: headless assignment runner for the clinic duty roster.
//!
//! Usage:
//!   roster-runner --db roster.db --period <id>            (preview)
//!   roster-runner --db roster.db --period <id> --commit
//!   roster-runner --db roster.db --demo --commit --notify
//!   roster-runner --db roster.db --period <id> --json
//!
//! Preview computes and prints the assignment without writing anything;
//! --commit atomically replaces the period's persisted assignments.

use anyhow::Result;
use chrono::{Datelike, NaiveDate, Weekday};
use roster_core::{
    config::SolverConfig,
    engine::RosterEngine,
    notify::{notify_assignments, LogMailer},
    period::Period,
    report::RunReport,
    slot::{Slot, SlotKind},
    store::RosterStore,
};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = arg_value(&args, "--db").unwrap_or(":memory:");
    let commit = args.iter().any(|a| a == "--commit");
    let demo = args.iter().any(|a| a == "--demo");
    let notify = args.iter().any(|a| a == "--notify");
    let json = args.iter().any(|a| a == "--json");

    let config = match arg_value(&args, "--config") {
        Some(path) => SolverConfig::from_file(Path::new(path))?,
        None => SolverConfig::default(),
    };

    let store = RosterStore::open(db)?;
    store.migrate()?;

    let period_id = if demo {
        seed_demo(&store)?
    } else {
        match arg_value(&args, "--period") {
            Some(p) => p.to_string(),
            None => anyhow::bail!("--period <id> is required (or pass --demo)"),
        }
    };

    let engine = RosterEngine::new(store, config);
    let report = if commit {
        engine.commit(&period_id)?
    } else {
        engine.preview(&period_id)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if notify {
        let mut mailer = LogMailer;
        let dispatch = notify_assignments(&report, engine.store(), &mut mailer)?;
        println!();
        println!("notifications: {} sent, {} failed", dispatch.sent, dispatch.failed);
    }

    Ok(())
}

fn print_report(report: &RunReport) {
    println!("=== ASSIGNMENT RUN ===");
    println!("  period:      {}", report.period_id);
    println!("  run:         {}", report.run_id);
    println!("  mode:        {}", if report.dry_run { "preview" } else { "commit" });
    println!("  assignments: {}", report.assignment_count);
    println!("  holes:       {}", report.hole_count);

    if !report.assignments.is_empty() {
        println!();
        println!("=== ROSTER ===");
        for row in &report.assignments {
            println!("  {} {:22} {}", row.date, row.kind.label(), row.physician);
        }
    }

    if !report.holes.is_empty() {
        println!();
        println!("=== HOLES ===");
        for hole in &report.holes {
            let diagnosis = if hole.candidate_count == 0 {
                "nobody available".to_string()
            } else {
                format!("{} available but excluded by rules", hole.candidate_count)
            };
            println!("  {} {:22} ({diagnosis})", hole.date, hole.kind.label());
        }
    }
}

/// Seed a small fixed fixture: one two-week period in July 2026 with four
/// physicians. Idempotent; reruns reuse the existing period.
fn seed_demo(store: &RosterStore) -> Result<String> {
    let period = Period {
        id:        "demo-2026-07".to_string(),
        label:     "demo-2026-07".to_string(),
        starts_on: date(2026, 7, 6),
        ends_on:   date(2026, 7, 19),
    };
    let created = store.insert_period_if_absent(&period)?;
    if !created {
        return Ok(period.id);
    }

    let mut slots: Vec<Slot> = Vec::new();
    let mut day = period.starts_on;
    while day <= period.ends_on {
        let kinds: &[SlotKind] = match day.weekday() {
            Weekday::Sat => &[SlotKind::SaturdayDay, SlotKind::SaturdayNight],
            Weekday::Sun => &[
                SlotKind::SundayMorning,
                SlotKind::SundayDay,
                SlotKind::SundayNight,
            ],
            _ => &[SlotKind::WeekdayNight],
        };
        for kind in kinds {
            let id = format!("demo-{}-{}", day, kind.as_str());
            slots.push(Slot::new(id, period.id.clone(), day, *kind));
        }
        day = day.succ_opt().unwrap_or(day);
    }
    store.insert_slots(&slots)?;

    let physicians = [
        ("u-alice", "Alice Martin", Some(2u8)),
        ("u-bob", "Bob Keller", None),
        ("u-carol", "Carol Nguyen", Some(5u8)),
        ("u-dave", "Dave Romero", Some(1u8)),
    ];
    for (user_id, name, level) in physicians {
        let address = format!("{}@clinic.example", &user_id[2..]);
        store.upsert_physician(user_id, name, Some(&address))?;
        store.set_target_level(user_id, &period.id, level)?;
    }

    for slot in &slots {
        // Alice takes anything; Bob covers weekends; Carol covers nights;
        // Dave only the first week's weekday nights.
        store.set_availability("u-alice", &slot.id, true)?;
        if slot.kind != SlotKind::WeekdayNight {
            store.set_availability("u-bob", &slot.id, true)?;
        }
        if slot.is_night() {
            store.set_availability("u-carol", &slot.id, true)?;
        }
        if slot.kind == SlotKind::WeekdayNight && slot.date < date(2026, 7, 13) {
            store.set_availability("u-dave", &slot.id, true)?;
        }
    }

    log::info!("demo: seeded period {} with {} slots", period.id, slots.len());
    Ok(period.id)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
