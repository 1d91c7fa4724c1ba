//! # taskforge-ollama
//!
//! Single round-trip Ollama reachability probe.
//!
//! Before an agent is bound to a model, the registry verifies the endpoint
//! can actually serve it: one `POST /api/generate` with a fixed greeting and
//! `stream: false`. HTTP 200 means reachable; any other status or transport
//! failure is a typed [`ProbeError`]. No retries, no cancellation — each
//! probe is independent and may run while others are in flight.
//!
//! [`ModelProbe`] is the seam the registry depends on, so tests can swap in
//! a scripted probe without a live Ollama.

#![deny(unsafe_code)]

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, instrument, warn};

/// Default Ollama endpoint base.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Fixed handshake payload prompt.
const GREETING: &str = "Hello, are you ready?";

/// Why a handshake failed.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The endpoint could not be reached at the transport level.
    #[error("Ollama endpoint unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),
    /// The endpoint answered with a non-success status.
    #[error("Ollama returned unexpected status code {status}")]
    UnexpectedStatus {
        /// The HTTP status the endpoint answered with.
        status: u16,
    },
}

/// Result alias for probe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;

/// A handshake with a named model endpoint.
#[async_trait]
pub trait ModelProbe: Send + Sync {
    /// Verify `model` is reachable and responsive.
    async fn probe(&self, model: &str) -> Result<()>;
}

/// Probe implementation talking to a real Ollama instance.
pub struct OllamaProbe {
    base_url: String,
    client: reqwest::Client,
}

impl Default for OllamaProbe {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl OllamaProbe {
    /// Create a probe against `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a probe with a shared HTTP client.
    #[must_use]
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }
}

#[async_trait]
impl ModelProbe for OllamaProbe {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn probe(&self, model: &str) -> Result<()> {
        let url = format!("{}/api/generate", self.base_url);
        let body = json!({
            "model": model,
            "prompt": GREETING,
            "stream": false,
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(model, error = %e, "Ollama handshake failed at transport level");
                ProbeError::Unreachable(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(model, status = status.as_u16(), "Ollama handshake rejected");
            return Err(ProbeError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        debug!(model, "Ollama handshake succeeded");
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
