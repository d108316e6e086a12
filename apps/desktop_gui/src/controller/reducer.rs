//! View state and the transitions user actions and backend events apply to it.

use chrono::{DateTime, Utc};
use client_core::ReminderSummary;
use shared::{
    domain::{AssignmentId, ReminderWindow},
    protocol::{Assignment, NewAssignment, Submission},
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};

#[derive(Debug, Clone)]
pub struct ViewState {
    pub assignments: Vec<Assignment>,
    pub assignment_draft: NewAssignment,
    pub submission_draft: Submission,
    pub reminder_window: ReminderWindow,
    pub status: String,
    pub last_error: Option<UiError>,
    pub last_reminder_summary: Option<ReminderSummary>,
    selected: Option<AssignmentId>,
    sending: bool,
    loading: bool,
}

impl ViewState {
    pub fn new(reminder_window: ReminderWindow) -> Self {
        Self {
            assignments: Vec::new(),
            assignment_draft: NewAssignment::default(),
            submission_draft: Submission::default(),
            reminder_window,
            status: "Loading assignments...".to_string(),
            last_error: None,
            last_reminder_summary: None,
            selected: None,
            sending: false,
            loading: false,
        }
    }

    pub fn selected(&self) -> Option<&AssignmentId> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &AssignmentId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    pub fn selected_assignment(&self) -> Option<&Assignment> {
        let id = self.selected.as_ref()?;
        self.assignments.iter().find(|a| &a.id == id)
    }

    pub fn submission_form_visible(&self) -> bool {
        self.selected.is_some()
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn refresh(&mut self) -> BackendCommand {
        self.loading = true;
        BackendCommand::RefreshAssignments
    }

    /// Draft fields go out as typed; the draft is cleared once the server accepts it.
    pub fn create_assignment(&mut self) -> BackendCommand {
        self.loading = true;
        BackendCommand::CreateAssignment {
            assignment: self.assignment_draft.clone(),
        }
    }

    pub fn select(&mut self, id: AssignmentId) {
        self.selected = Some(id);
        self.submission_draft = Submission::default();
    }

    pub fn cancel_selection(&mut self) {
        self.selected = None;
    }

    pub fn submit(&mut self) -> Option<BackendCommand> {
        let assignment_id = self.selected.clone()?;
        self.loading = true;
        Some(BackendCommand::SubmitWork {
            assignment_id,
            submission: self.submission_draft.clone(),
        })
    }

    pub fn set_reminder_window(&mut self, window: ReminderWindow) {
        self.reminder_window = window;
    }

    /// Refused while a batch is already in flight.
    pub fn send_reminders(&mut self, now: DateTime<Utc>) -> Option<BackendCommand> {
        if self.sending {
            return None;
        }
        self.sending = true;
        self.status = format!(
            "Sending reminders for deadlines in the next {}...",
            self.reminder_window.label()
        );
        Some(BackendCommand::SendReminders {
            assignments: self.assignments.clone(),
            window: self.reminder_window,
            now,
        })
    }

    /// Undoes the in-flight flag of a command the backend never received.
    pub fn dispatch_failed(&mut self, cmd: &BackendCommand) {
        match cmd {
            BackendCommand::SendReminders { .. } => self.sending = false,
            BackendCommand::RefreshAssignments
            | BackendCommand::CreateAssignment { .. }
            | BackendCommand::SubmitWork { .. } => self.loading = false,
        }
    }

    /// Mutations keep `loading` set: the worker follows each with a refresh.
    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::AssignmentsLoaded(assignments) => {
                self.loading = false;
                self.status = format!("{} assignment(s) available", assignments.len());
                self.assignments = assignments;
            }
            UiEvent::AssignmentCreated => {
                self.assignment_draft = NewAssignment::default();
                self.last_error = None;
                self.status = "Assignment created".to_string();
            }
            UiEvent::WorkSubmitted { assignment_id } => {
                if self.selected.as_ref() == Some(&assignment_id) {
                    self.selected = None;
                }
                self.last_error = None;
                self.status = "Submission sent".to_string();
            }
            UiEvent::RemindersFinished(summary) => {
                self.sending = false;
                self.status = summary.status_line();
                self.last_reminder_summary = Some(summary);
            }
            UiEvent::Error(err) => {
                self.loading = false;
                self.status = err.status_line();
                self.last_error = Some(err);
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
