use serde::{Deserialize, Serialize};

/// Error payload the assignment API may attach to a non-success response.
///
/// The server is not consistent about the field name, so both `message` and
/// `error` are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .map(str::trim)
            .filter(|detail| !detail.is_empty())
    }

    /// Best-effort description of an error response body.
    pub fn describe_body(body: &str) -> String {
        match serde_json::from_str::<ApiError>(body) {
            Ok(parsed) => match parsed.detail() {
                Some(detail) => detail.to_string(),
                None => body.trim().to_string(),
            },
            Err(_) => body.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_message_over_error_field() {
        let body = r#"{"message": "Assignment not found", "error": "NotFound"}"#;
        assert_eq!(ApiError::describe_body(body), "Assignment not found");
    }

    #[test]
    fn falls_back_to_error_field_then_raw_text() {
        assert_eq!(ApiError::describe_body(r#"{"error": "boom"}"#), "boom");
        assert_eq!(ApiError::describe_body("  plain failure \n"), "plain failure");
        assert_eq!(ApiError::describe_body(r#"{"message": "  "}"#), r#"{"message": "  "}"#);
    }
}
