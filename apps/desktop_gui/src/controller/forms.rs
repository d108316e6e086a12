//! Closed sets of form fields with typed accessors onto the drafts they edit.

use shared::protocol::{NewAssignment, Submission};

pub const TIMESTAMP_PLACEHOLDER: &str = "YYYY-MM-DDTHH:mm:ssZ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentField {
    Title,
    Description,
    Deadline,
}

impl AssignmentField {
    pub const ALL: [AssignmentField; 3] = [
        AssignmentField::Title,
        AssignmentField::Description,
        AssignmentField::Deadline,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AssignmentField::Title => "Title",
            AssignmentField::Description => "Description",
            AssignmentField::Deadline => "Deadline",
        }
    }

    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            AssignmentField::Deadline => Some(TIMESTAMP_PLACEHOLDER),
            _ => None,
        }
    }

    pub fn get(self, draft: &NewAssignment) -> &str {
        match self {
            AssignmentField::Title => &draft.title,
            AssignmentField::Description => &draft.description,
            AssignmentField::Deadline => &draft.deadline,
        }
    }

    pub fn get_mut(self, draft: &mut NewAssignment) -> &mut String {
        match self {
            AssignmentField::Title => &mut draft.title,
            AssignmentField::Description => &mut draft.description,
            AssignmentField::Deadline => &mut draft.deadline,
        }
    }

    pub fn set(self, draft: &mut NewAssignment, value: impl Into<String>) {
        *self.get_mut(draft) = value.into();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionField {
    StudentName,
    SubmissionLink,
    SubmittedAt,
}

impl SubmissionField {
    pub const ALL: [SubmissionField; 3] = [
        SubmissionField::StudentName,
        SubmissionField::SubmissionLink,
        SubmissionField::SubmittedAt,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SubmissionField::StudentName => "STUDENT NAME",
            SubmissionField::SubmissionLink => "SUBMISSION LINK",
            SubmissionField::SubmittedAt => "SUBMITTED AT",
        }
    }

    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            SubmissionField::SubmittedAt => Some(TIMESTAMP_PLACEHOLDER),
            _ => None,
        }
    }

    pub fn get(self, draft: &Submission) -> &str {
        match self {
            SubmissionField::StudentName => &draft.student_name,
            SubmissionField::SubmissionLink => &draft.submission_link,
            SubmissionField::SubmittedAt => &draft.submitted_at,
        }
    }

    pub fn get_mut(self, draft: &mut Submission) -> &mut String {
        match self {
            SubmissionField::StudentName => &mut draft.student_name,
            SubmissionField::SubmissionLink => &mut draft.submission_link,
            SubmissionField::SubmittedAt => &mut draft.submitted_at,
        }
    }

    pub fn set(self, draft: &mut Submission, value: impl Into<String>) {
        *self.get_mut(draft) = value.into();
    }
}
