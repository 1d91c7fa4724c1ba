//! # taskforge-runtime
//!
//! State holders for the current project and the agent roster.
//!
//! Both [`project::ProjectService`] and [`agents::AgentRegistry`] follow the
//! same contract: every accepted mutation produces a fresh immutable
//! snapshot (readers holding an `Arc` are never torn) and then explicitly
//! mirrors the full snapshot to its store slot. The store never owns state —
//! a failed write only leaves the durable copy stale.

#![deny(unsafe_code)]

pub mod agents;
pub mod project;

pub use agents::{AgentRegistry, ConnectError};
pub use project::ProjectService;
