//! Core types for projects, tasks, and agents.
//!
//! All serializable types use `camelCase` for wire compatibility with the
//! dashboard and with snapshots persisted by earlier versions. Status and
//! priority are closed enums — arbitrary strings never flow into
//! comparisons.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Enums
// ─────────────────────────────────────────────────────────────────────────────

/// Task status in the checklist workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not yet started.
    Pending,
    /// Currently being worked on.
    InProgress,
    /// Done.
    Completed,
}

impl TaskStatus {
    /// Wire string representation (matches the persisted snapshot values).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Low priority.
    Low,
    /// Default priority.
    Medium,
    /// Elevated priority.
    High,
}

impl TaskPriority {
    /// Wire string representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Agent working status.
///
/// Transitions are caller-driven; the registry enforces no ordering rules,
/// any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// Available for work.
    Idle,
    /// Busy with the current task.
    Working,
    /// Finished the current task.
    Completed,
}

impl AgentStatus {
    /// Wire string representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Working => "working",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Domain types
// ─────────────────────────────────────────────────────────────────────────────

/// A single checklist task, optionally with one level of subtasks.
///
/// Nesting is bounded to two levels (task, subtask) by design; subtasks
/// never carry children of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique within the owning project, including nested subtasks.
    pub id: String,
    /// Short description of the work.
    pub description: String,
    /// Role name this task is assigned to (e.g. "Developer").
    pub assigned_to: String,
    /// Current status.
    pub status: TaskStatus,
    /// Priority level.
    pub priority: TaskPriority,
    /// Free-text category label (e.g. "Frontend", "Database").
    pub submodule: String,
    /// Id of the parent task, set on subtasks only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_task_id: Option<String>,
    /// Child tasks. `None` for leaf tasks; never an empty list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<Task>>,
}

/// The current project: a named checklist of top-level tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique id (millisecond timestamp rendered as a decimal string).
    pub id: String,
    /// User-chosen project name.
    pub name: String,
    /// Derived, informational filesystem path.
    pub path: String,
    /// Top-level tasks, in display order.
    pub tasks: Vec<Task>,
    /// Category labels available in this project, in display order.
    pub submodules: Vec<String>,
}

impl Project {
    /// Next free task id for appending a task to this project.
    ///
    /// Generated batches number tasks `"1"`..`"7"` within the batch, so a
    /// later append must pick a decimal id greater than every numeric id
    /// already present (top-level and subtasks both count).
    #[must_use]
    pub fn next_task_id(&self) -> String {
        let max = self
            .tasks
            .iter()
            .flat_map(|t| {
                std::iter::once(t.id.as_str())
                    .chain(t.subtasks.iter().flatten().map(|s| s.id.as_str()))
            })
            .filter_map(|id| id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        (max + 1).to_string()
    }
}

/// A fixed worker role slot, optionally bound to an Ollama model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Fixed id, one of `"1"`..`"4"`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Role label (matches `Task::assigned_to` values).
    pub role: String,
    /// Current working status.
    pub status: AgentStatus,
    /// Free-text description of what the agent is doing; empty when idle.
    pub current_task: String,
    /// Bound model identifier, or empty when unbound.
    pub ollama_instance: String,
}

impl Agent {
    fn role_slot(id: &str, role: &str) -> Self {
        Self {
            id: id.to_string(),
            name: role.to_string(),
            role: role.to_string(),
            status: AgentStatus::Idle,
            current_task: String::new(),
            ollama_instance: String::new(),
        }
    }

    /// The fixed four-role roster the registry is seeded with.
    #[must_use]
    pub fn default_roster() -> Vec<Self> {
        vec![
            Self::role_slot("1", "Developer"),
            Self::role_slot("2", "Researcher"),
            Self::role_slot("3", "Tester"),
            Self::role_slot("4", "Bug Fixer"),
        ]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
