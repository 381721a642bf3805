//! Email notification step, decoupled from the assignment commit.
//!
//! A failed send never rolls back persisted assignments; the dispatch
//! summary reports sent vs failed counts and that is all. Real transport
//! is an external collaborator behind the `Mailer` trait; the in-tree
//! implementation only logs.

use crate::{error::RosterResult, report::RunReport, store::RosterStore};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to:      String,
    pub subject: String,
    pub html:    String,
    pub text:    String,
}

pub trait Mailer {
    fn send(&mut self, email: &OutboundEmail) -> RosterResult<()>;
}

/// Mailer that logs instead of sending.
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&mut self, email: &OutboundEmail) -> RosterResult<()> {
        log::info!("mail to={} subject='{}'", email.to, email.subject);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub sent:   u32,
    pub failed: u32,
}

/// Send each assigned physician their duty list for the period.
///
/// A physician without a stored address counts as failed; so does any
/// transport error. Store I/O errors still propagate — they are a caller
/// problem, not a delivery outcome.
pub fn notify_assignments(
    report: &RunReport,
    store: &RosterStore,
    mailer: &mut dyn Mailer,
) -> RosterResult<DispatchSummary> {
    let mut duties: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for row in &report.assignments {
        duties
            .entry(row.user_id.as_str())
            .or_default()
            .push(format!("{} {}", row.date, row.kind.label()));
    }

    let mut summary = DispatchSummary::default();
    for (user_id, lines) in duties {
        let Some(address) = store.physician_email(user_id)? else {
            log::warn!(
                "period={} notify: no address for physician {user_id}, skipping",
                report.period_id
            );
            summary.failed += 1;
            continue;
        };

        let email = OutboundEmail {
            to:      address,
            subject: format!("On-call duties for period {}", report.period_id),
            html:    format!(
                "<p>Your upcoming on-call duties:</p><ul>{}</ul>",
                lines
                    .iter()
                    .map(|l| format!("<li>{l}</li>"))
                    .collect::<String>()
            ),
            text:    lines.join("\n"),
        };

        match mailer.send(&email) {
            Ok(()) => summary.sent += 1,
            Err(e) => {
                log::warn!(
                    "period={} notify: send to {user_id} failed: {e}",
                    report.period_id
                );
                summary.failed += 1;
            }
        }
    }

    log::info!(
        "period={} notify: {} sent, {} failed",
        report.period_id,
        summary.sent,
        summary.failed
    );
    Ok(summary)
}
