//! Reminder-window selection and sequential reminder dispatch.
//!
//! An assignment is "upcoming" when `now < deadline <= now + window`.
//! Deadlines that do not parse are skipped with a warning; they never abort
//! the selection.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use shared::{
    domain::{AssignmentId, ReminderWindow},
    protocol::{Assignment, ReminderRequest},
};
use tracing::{info, warn};

use crate::AssignmentApi;

/// Placeholder recipient until per-student addresses exist server side.
pub const DEFAULT_REMINDER_RECIPIENT: &str = "reminders@example.com";

/// Offset forms that RFC 3339 rejects, such as `2024-05-01T10:30+02:00`.
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M:%S%.f%z"];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses an ISO-8601-like deadline. Values without an offset are read as UTC.
pub fn parse_deadline(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    // "2024-05-01T10:00Z" is not RFC 3339 but browsers accept it.
    let naive = raw
        .strip_suffix('Z')
        .or_else(|| raw.strip_suffix('z'))
        .unwrap_or(raw);

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

pub fn reminder_cutoff(now: DateTime<Utc>, window: ReminderWindow) -> DateTime<Utc> {
    now + Duration::hours(i64::from(window.hours()))
}

pub fn is_upcoming(deadline: DateTime<Utc>, now: DateTime<Utc>, window: ReminderWindow) -> bool {
    deadline > now && deadline <= reminder_cutoff(now, window)
}

#[derive(Debug, Default)]
pub struct UpcomingSelection<'a> {
    pub upcoming: Vec<&'a Assignment>,
    pub unparseable: Vec<&'a AssignmentId>,
}

pub fn select_upcoming(
    assignments: &[Assignment],
    now: DateTime<Utc>,
    window: ReminderWindow,
) -> UpcomingSelection<'_> {
    let mut selection = UpcomingSelection::default();
    for assignment in assignments {
        match parse_deadline(&assignment.deadline) {
            Some(deadline) => {
                if is_upcoming(deadline, now, window) {
                    selection.upcoming.push(assignment);
                }
            }
            None => {
                warn!(
                    assignment_id = %assignment.id,
                    deadline = %assignment.deadline,
                    "skipping assignment with unparseable deadline"
                );
                selection.unparseable.push(&assignment.id);
            }
        }
    }
    selection
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderOutcome {
    Sent,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderDelivery {
    pub assignment_id: AssignmentId,
    pub title: String,
    pub outcome: ReminderOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderSummary {
    pub deliveries: Vec<ReminderDelivery>,
    pub skipped_unparseable: usize,
}

impl ReminderSummary {
    pub fn attempted(&self) -> usize {
        self.deliveries.len()
    }

    pub fn succeeded(&self) -> usize {
        self.deliveries
            .iter()
            .filter(|delivery| delivery.outcome == ReminderOutcome::Sent)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }

    pub fn status_line(&self) -> String {
        let mut line = format!(
            "Sent reminders for {} assignment(s).",
            self.attempted()
        );
        if self.failed() > 0 {
            line.push_str(&format!(" {} failed.", self.failed()));
        }
        line
    }
}

/// Sends one reminder per upcoming assignment, one request at a time.
///
/// A failed send is recorded and the batch continues with the next
/// assignment.
pub async fn send_reminders<A: AssignmentApi + ?Sized>(
    api: &A,
    recipient: &str,
    assignments: &[Assignment],
    now: DateTime<Utc>,
    window: ReminderWindow,
) -> ReminderSummary {
    let selection = select_upcoming(assignments, now, window);
    info!(
        now = %now.to_rfc3339(),
        cutoff = %reminder_cutoff(now, window).to_rfc3339(),
        total = assignments.len(),
        upcoming = selection.upcoming.len(),
        "sending reminder batch"
    );

    let mut summary = ReminderSummary {
        deliveries: Vec::with_capacity(selection.upcoming.len()),
        skipped_unparseable: selection.unparseable.len(),
    };
    for assignment in selection.upcoming {
        let request = ReminderRequest::for_assignment(recipient, assignment);
        let outcome = match api.send_reminder(&request).await {
            Ok(()) => ReminderOutcome::Sent,
            Err(err) => {
                warn!(assignment_id = %assignment.id, "reminder send failed: {err}");
                ReminderOutcome::Failed(err.to_string())
            }
        };
        summary.deliveries.push(ReminderDelivery {
            assignment_id: assignment.id.clone(),
            title: assignment.title.clone(),
            outcome,
        });
    }
    summary
}

#[cfg(test)]
#[path = "tests/reminders_tests.rs"]
mod tests;
