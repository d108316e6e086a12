use super::*;
use crate::ClientError;
use async_trait::async_trait;
use chrono::TimeZone;
use reqwest::StatusCode;
use shared::protocol::{NewAssignment, Submission};
use std::sync::Mutex;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("now")
}

fn assignment(id: &str, title: &str, deadline: impl Into<String>) -> Assignment {
    Assignment {
        id: AssignmentId::new(id),
        title: title.to_string(),
        description: String::new(),
        deadline: deadline.into(),
        submissions: Vec::new(),
    }
}

fn at(offset: Duration) -> String {
    (now() + offset).to_rfc3339()
}

#[derive(Default)]
struct RecordingApi {
    sent: Mutex<Vec<ReminderRequest>>,
    fail_subjects_containing: Option<String>,
}

#[async_trait]
impl AssignmentApi for RecordingApi {
    async fn create_assignment(&self, _assignment: &NewAssignment) -> Result<(), ClientError> {
        unreachable!("reminders never create assignments")
    }

    async fn fetch_assignments(&self) -> Result<Vec<Assignment>, ClientError> {
        unreachable!("reminders work on the list they are given")
    }

    async fn submit_assignment(
        &self,
        _assignment_id: &AssignmentId,
        _submission: &Submission,
    ) -> Result<(), ClientError> {
        unreachable!("reminders never submit work")
    }

    async fn send_reminder(&self, request: &ReminderRequest) -> Result<(), ClientError> {
        self.sent.lock().expect("lock").push(request.clone());
        match &self.fail_subjects_containing {
            Some(needle) if request.subject.contains(needle.as_str()) => {
                Err(ClientError::Status {
                    endpoint: "POST /send-reminder".to_string(),
                    status: StatusCode::BAD_GATEWAY,
                    detail: "mail relay down".to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

#[test]
fn parses_common_iso_deadline_shapes() {
    let expected = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).single().expect("ts");
    for raw in [
        "2024-05-01T10:30:00Z",
        "2024-05-01T10:30:00.000Z",
        "2024-05-01T12:30:00+02:00",
        "2024-05-01T12:30+02:00",
        "2024-05-01T08:30-02:00",
        "2024-05-01T12:30:00+0200",
        "2024-05-01T10:30:00",
        "2024-05-01T10:30",
        "2024-05-01T10:30Z",
        "2024-05-01 10:30:00",
        "  2024-05-01T10:30:00Z  ",
    ] {
        assert_eq!(parse_deadline(raw), Some(expected), "input {raw:?}");
    }
    assert_eq!(
        parse_deadline("2024-05-01"),
        Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).single()
    );
}

#[test]
fn rejects_garbage_deadlines() {
    for raw in ["", "   ", "tomorrow", "2024-13-01", "01/05/2024", "2024-05-01T25:00:00Z"] {
        assert_eq!(parse_deadline(raw), None, "input {raw:?}");
    }
}

#[test]
fn deadline_equal_to_now_is_excluded() {
    assert!(!is_upcoming(now(), now(), ReminderWindow::OneDay));
}

#[test]
fn deadline_equal_to_cutoff_is_included() {
    let cutoff = reminder_cutoff(now(), ReminderWindow::OneDay);
    assert_eq!(cutoff, now() + Duration::hours(24));
    assert!(is_upcoming(cutoff, now(), ReminderWindow::OneDay));
    assert!(!is_upcoming(
        cutoff + Duration::seconds(1),
        now(),
        ReminderWindow::OneDay
    ));
}

#[test]
fn overdue_and_far_future_assignments_are_excluded() {
    let assignments = vec![
        assignment("past", "Past", at(-Duration::minutes(1))),
        assignment("soon", "Soon", at(Duration::minutes(30))),
        assignment("later", "Later", at(Duration::hours(7))),
    ];
    let selection = select_upcoming(&assignments, now(), ReminderWindow::SixHours);
    let ids: Vec<_> = selection.upcoming.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["soon"]);
    assert!(selection.unparseable.is_empty());
}

#[test]
fn every_window_respects_its_boundaries() {
    for window in ReminderWindow::ALL {
        let hours = i64::from(window.hours());
        let assignments = vec![
            assignment("at-now", "A", at(Duration::zero())),
            assignment("at-cutoff", "B", at(Duration::hours(hours))),
            assignment("past-cutoff", "C", at(Duration::hours(hours) + Duration::seconds(1))),
        ];
        let selection = select_upcoming(&assignments, now(), window);
        let ids: Vec<_> = selection.upcoming.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["at-cutoff"], "window {window}");
    }
}

#[test]
fn unparseable_deadlines_are_skipped_not_fatal() {
    let assignments = vec![
        assignment("bad", "Bad", "next friday"),
        assignment("good", "Good", at(Duration::hours(1))),
        assignment("empty", "Empty", ""),
    ];
    let selection = select_upcoming(&assignments, now(), ReminderWindow::OneDay);
    assert_eq!(selection.upcoming.len(), 1);
    assert_eq!(selection.upcoming[0].id.as_str(), "good");
    let skipped: Vec<_> = selection.unparseable.iter().map(|id| id.as_str()).collect();
    assert_eq!(skipped, vec!["bad", "empty"]);
}

#[tokio::test]
async fn only_assignments_inside_the_window_get_a_reminder() {
    let api = RecordingApi::default();
    let assignments = vec![
        assignment("a", "Essay", at(Duration::hours(2))),
        assignment("b", "Project", at(Duration::hours(30))),
    ];

    let summary = send_reminders(
        &api,
        DEFAULT_REMINDER_RECIPIENT,
        &assignments,
        now(),
        ReminderWindow::OneDay,
    )
    .await;

    assert_eq!(summary.attempted(), 1);
    assert_eq!(summary.succeeded(), 1);
    assert_eq!(summary.status_line(), "Sent reminders for 1 assignment(s).");

    let sent = api.sent.lock().expect("lock");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to_email, DEFAULT_REMINDER_RECIPIENT);
    assert_eq!(sent[0].subject, "Reminder: \"Essay\" due soon");
    assert_eq!(
        sent[0].content,
        format!("Your assignment \"Essay\" is due at {}.", assignments[0].deadline)
    );
}

#[tokio::test]
async fn a_failed_send_does_not_stop_the_batch() {
    let api = RecordingApi {
        fail_subjects_containing: Some("First".to_string()),
        ..RecordingApi::default()
    };
    let assignments = vec![
        assignment("1", "First", at(Duration::hours(1))),
        assignment("2", "Second", at(Duration::hours(2))),
        assignment("3", "Third", "not a date"),
    ];

    let summary = send_reminders(
        &api,
        "teacher@example.com",
        &assignments,
        now(),
        ReminderWindow::SixHours,
    )
    .await;

    assert_eq!(api.sent.lock().expect("lock").len(), 2);
    assert_eq!(summary.attempted(), 2);
    assert_eq!(summary.succeeded(), 1);
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.skipped_unparseable, 1);
    assert!(matches!(
        &summary.deliveries[0].outcome,
        ReminderOutcome::Failed(reason) if reason.contains("mail relay down")
    ));
    assert_eq!(summary.deliveries[1].outcome, ReminderOutcome::Sent);
    assert_eq!(
        summary.status_line(),
        "Sent reminders for 2 assignment(s). 1 failed."
    );
}

#[tokio::test]
async fn empty_selection_sends_nothing() {
    let api = RecordingApi::default();
    let summary = send_reminders(&api, "x@example.com", &[], now(), ReminderWindow::OneHour).await;
    assert_eq!(summary, ReminderSummary::default());
    assert!(api.sent.lock().expect("lock").is_empty());
}
