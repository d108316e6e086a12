use serde::{Deserialize, Serialize};

use crate::domain::AssignmentId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(rename = "_id")]
    pub id: AssignmentId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub deadline: String,
    #[serde(default)]
    pub submissions: Vec<Submission>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub student_name: String,
    pub submission_link: String,
    pub submitted_at: String,
}

/// Body of `POST /assignments`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAssignment {
    pub title: String,
    pub description: String,
    pub deadline: String,
}

/// Body of `POST /send-reminder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderRequest {
    pub to_email: String,
    pub subject: String,
    pub content: String,
}

impl ReminderRequest {
    pub fn for_assignment(to_email: impl Into<String>, assignment: &Assignment) -> Self {
        Self {
            to_email: to_email.into(),
            subject: format!("Reminder: \"{}\" due soon", assignment.title),
            content: format!(
                "Your assignment \"{}\" is due at {}.",
                assignment.title, assignment.deadline
            ),
        }
    }
}
