//! # taskforge-server
//!
//! HTTP surface for task generation.
//!
//! - [`routes::router`] — the axum application: `POST /api/generate-tasks`
//!   turning `{projectName, template}` into a generated checklist. The
//!   handler is infallible: unknown templates resolve through the catalog
//!   fallback, never through an error response.
//! - [`client::GenerateClient`] — the caller side, with a 10 second timeout
//!   and the transport-error taxonomy surfaced as distinct, user-facing
//!   messages.

#![deny(unsafe_code)]

pub mod client;
pub mod routes;

pub use client::{GenerateClient, GenerateError};
pub use routes::{GenerateTasksRequest, GenerateTasksResponse, router};
