//! UI/backend events and error modeling for desktop GUI controller.

use client_core::{ClientError, ReminderSummary};
use shared::{domain::AssignmentId, protocol::Assignment};

#[derive(Debug, Clone)]
pub enum UiEvent {
    AssignmentsLoaded(Vec<Assignment>),
    AssignmentCreated,
    WorkSubmitted { assignment_id: AssignmentId },
    RemindersFinished(ReminderSummary),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Server,
    Decode,
    Config,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadAssignments,
    CreateAssignment,
    SubmitWork,
}

impl UiErrorContext {
    pub fn action(self) -> &'static str {
        match self {
            UiErrorContext::BackendStartup => "Starting backend",
            UiErrorContext::LoadAssignments => "Loading assignments",
            UiErrorContext::CreateAssignment => "Creating assignment",
            UiErrorContext::SubmitWork => "Submitting work",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::Transport { .. } => UiErrorCategory::Transport,
            ClientError::Status { .. } => UiErrorCategory::Server,
            ClientError::Decode { .. } => UiErrorCategory::Decode,
            ClientError::InvalidBaseUrl { .. } => UiErrorCategory::Config,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("disconnect")
            || message_lower.contains("queue")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("url") || message_lower.contains("config") {
            UiErrorCategory::Config
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_line(&self) -> String {
        let label = match self.category {
            UiErrorCategory::Transport => "server unreachable",
            UiErrorCategory::Server => "server error",
            UiErrorCategory::Decode => "unexpected response",
            UiErrorCategory::Config => "configuration error",
            UiErrorCategory::Unknown => "error",
        };
        format!("{} failed ({label}): {}", self.context.action(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_categorized_by_variant() {
        let err = ClientError::Status {
            endpoint: "PUT /assignments/x/submit".to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
            detail: "Assignment not found".to_string(),
        };
        let ui = UiError::from_client_error(UiErrorContext::SubmitWork, &err);
        assert_eq!(ui.category(), UiErrorCategory::Server);
        assert_eq!(ui.context(), UiErrorContext::SubmitWork);
        assert!(ui.message().contains("Assignment not found"));
        assert!(ui
            .status_line()
            .starts_with("Submitting work failed (server error):"));
    }

    #[test]
    fn classifies_command_queue_disconnect_as_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "Backend command processor disconnected",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn unrecognized_messages_stay_unknown() {
        let err = UiError::from_message(UiErrorContext::BackendStartup, "something odd");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert_eq!(err.status_line(), "Starting backend failed (error): something odd");
    }
}
