use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use shared::{
    domain::AssignmentId,
    error::ApiError,
    protocol::{Assignment, NewAssignment, ReminderRequest, Submission},
};
use tracing::debug;
use url::Url;

pub mod error;
pub mod reminders;
pub mod settings;

pub use error::ClientError;
pub use reminders::{
    parse_deadline, select_upcoming, send_reminders, ReminderDelivery, ReminderOutcome,
    ReminderSummary, UpcomingSelection, DEFAULT_REMINDER_RECIPIENT,
};
pub use settings::{ClientSettings, SettingsError};

/// Remote operations of the assignment-tracking service.
///
/// Every call is a single request: no retries, no caching, no local
/// validation. The server is the source of truth for ids and payload shape.
#[async_trait]
pub trait AssignmentApi: Send + Sync {
    async fn create_assignment(&self, assignment: &NewAssignment) -> Result<(), ClientError>;
    async fn fetch_assignments(&self) -> Result<Vec<Assignment>, ClientError>;
    async fn submit_assignment(
        &self,
        assignment_id: &AssignmentId,
        submission: &Submission,
    ) -> Result<(), ClientError>;
    async fn send_reminder(&self, request: &ReminderRequest) -> Result<(), ClientError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let trimmed = base_url.trim();
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason,
        };

        let parsed = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "unsupported scheme '{}', expected http or https",
                parsed.scheme()
            )));
        }
        if parsed.cannot_be_a_base() || parsed.host_str().is_none() {
            return Err(invalid("URL has no host".to_string()));
        }
        Ok(Self { base_url: parsed })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins path segments onto the base URL, percent-encoding each segment.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

pub struct HttpAssignmentClient {
    http: Client,
    config: ClientConfig,
}

impl HttpAssignmentClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: Method, segments: &[&str]) -> (String, RequestBuilder) {
        let url = self.config.endpoint(segments);
        let endpoint = format!("{method} {}", url.path());
        (endpoint, self.http.request(method, url))
    }
}

async fn execute(endpoint: &str, request: RequestBuilder) -> Result<Response, ClientError> {
    debug!(endpoint, "calling assignment api");
    let response = request
        .send()
        .await
        .map_err(|source| ClientError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let mut detail = ApiError::describe_body(&body);
    if detail.is_empty() {
        detail = status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string();
    }
    Err(ClientError::Status {
        endpoint: endpoint.to_string(),
        status,
        detail,
    })
}

#[async_trait]
impl AssignmentApi for HttpAssignmentClient {
    async fn create_assignment(&self, assignment: &NewAssignment) -> Result<(), ClientError> {
        let (endpoint, request) = self.request(Method::POST, &["assignments"]);
        execute(&endpoint, request.json(assignment)).await?;
        Ok(())
    }

    async fn fetch_assignments(&self) -> Result<Vec<Assignment>, ClientError> {
        let (endpoint, request) = self.request(Method::GET, &["assignments"]);
        execute(&endpoint, request)
            .await?
            .json()
            .await
            .map_err(|source| ClientError::Decode { endpoint, source })
    }

    async fn submit_assignment(
        &self,
        assignment_id: &AssignmentId,
        submission: &Submission,
    ) -> Result<(), ClientError> {
        let (endpoint, request) = self.request(
            Method::PUT,
            &["assignments", assignment_id.as_str(), "submit"],
        );
        execute(&endpoint, request.json(submission)).await?;
        Ok(())
    }

    async fn send_reminder(&self, request: &ReminderRequest) -> Result<(), ClientError> {
        let (endpoint, builder) = self.request(Method::POST, &["send-reminder"]);
        execute(&endpoint, builder.json(request)).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
