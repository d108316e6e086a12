//! Backend commands queued from UI to backend worker.

use chrono::{DateTime, Utc};
use shared::{
    domain::{AssignmentId, ReminderWindow},
    protocol::{Assignment, NewAssignment, Submission},
};

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    RefreshAssignments,
    CreateAssignment {
        assignment: NewAssignment,
    },
    SubmitWork {
        assignment_id: AssignmentId,
        submission: Submission,
    },
    SendReminders {
        assignments: Vec<Assignment>,
        window: ReminderWindow,
        now: DateTime<Utc>,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::RefreshAssignments => "refresh_assignments",
            BackendCommand::CreateAssignment { .. } => "create_assignment",
            BackendCommand::SubmitWork { .. } => "submit_work",
            BackendCommand::SendReminders { .. } => "send_reminders",
        }
    }
}
