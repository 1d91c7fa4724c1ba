//! # taskforge-core
//!
//! Domain types and template-driven task generation for Taskforge.
//!
//! This crate provides the shared vocabulary the other Taskforge crates
//! depend on:
//!
//! - **Tasks and projects**: [`types::Task`], [`types::Project`] with closed
//!   status/priority enums ([`types::TaskStatus`], [`types::TaskPriority`])
//! - **Agents**: [`types::Agent`] role slots with [`types::AgentStatus`]
//! - **Generation**: [`templates::generate`] — the pure catalog-driven
//!   checklist builder
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other taskforge crates.

#![deny(unsafe_code)]

pub mod templates;
pub mod types;

pub use templates::generate;
pub use types::{Agent, AgentStatus, Project, Task, TaskPriority, TaskStatus};
