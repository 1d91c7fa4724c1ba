//! Caller side of the generation endpoint.
//!
//! Transport failures surface as one of four distinct, user-facing errors
//! ([`GenerateError`]); they propagate to the immediate caller for display
//! and are never silently swallowed. Generation itself cannot fail — an
//! unknown template is resolved server-side through the catalog fallback.

use std::time::Duration;

use tracing::{instrument, warn};

use taskforge_core::types::Task;

use crate::routes::{GenerateTasksRequest, GenerateTasksResponse};

/// Client-side deadline for one generation call.
pub const GENERATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport-level failure of a generation call.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The call exceeded the client-side deadline.
    #[error("Request timed out. Please try again.")]
    Timeout,
    /// The server answered with an error status.
    #[error("Server error: {status}")]
    Status {
        /// The HTTP status the server answered with.
        status: u16,
    },
    /// No response arrived at all.
    #[error("No response from server. Please check your network connection.")]
    Network,
    /// Anything else.
    #[error("An unexpected error occurred. Please try again.")]
    Unexpected,
}

/// Result alias for generation calls.
pub type Result<T> = std::result::Result<T, GenerateError>;

/// HTTP client for `POST /api/generate-tasks`.
pub struct GenerateClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl GenerateClient {
    /// Create a client against `base_url` with the standard 10 s timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
            timeout: GENERATE_TIMEOUT,
        }
    }

    /// Override the per-call deadline (tests use short deadlines).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Request a generated checklist for `project_name` under `template`.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn generate_tasks(&self, project_name: &str, template: &str) -> Result<Vec<Task>> {
        let request = GenerateTasksRequest {
            project_name: Some(project_name.to_string()),
            template: Some(template.to_string()),
        };

        let response = self
            .client
            .post(format!("{}/api/generate-tasks", self.base_url))
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "generation request failed to complete");
                map_send_error(&e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "generation request rejected");
            return Err(GenerateError::Status {
                status: status.as_u16(),
            });
        }

        let body: GenerateTasksResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "generation response unreadable");
            if e.is_timeout() {
                GenerateError::Timeout
            } else {
                GenerateError::Unexpected
            }
        })?;

        Ok(body.tasks)
    }
}

fn map_send_error(e: &reqwest::Error) -> GenerateError {
    if e.is_timeout() {
        GenerateError::Timeout
    } else if e.is_connect() || e.is_request() {
        GenerateError::Network
    } else {
        GenerateError::Unexpected
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
