//! Template-driven task generation.
//!
//! [`generate`] is a pure function: identical inputs always yield an
//! identical checklist, and nothing is mutated or persisted here. Every
//! generated batch starts with the same three bootstrap tasks, followed by
//! four tasks from the catalog entry selected by the template key. An
//! unrecognized key (including the empty string) is not an error — it falls
//! back to the `other` catalog entry.
//!
//! Task ids are batch-local: `"1"`..`"7"`, restarting on every call. A
//! project owns exactly one batch; tasks appended later take
//! [`Project::next_task_id`](crate::types::Project::next_task_id).

use tracing::debug;

use crate::types::{Task, TaskPriority, TaskStatus};

/// One catalog row: everything about a task except its batch-local id.
struct CatalogEntry {
    description: &'static str,
    assigned_to: &'static str,
    priority: TaskPriority,
    submodule: &'static str,
}

const fn entry(
    description: &'static str,
    assigned_to: &'static str,
    priority: TaskPriority,
    submodule: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        description,
        assigned_to,
        priority,
        submodule,
    }
}

/// Bootstrap tasks prepended to every generated batch.
const BOOTSTRAP: [CatalogEntry; 3] = [
    entry(
        "Set up project structure",
        "Developer",
        TaskPriority::High,
        "Setup",
    ),
    entry("Create README.md", "Developer", TaskPriority::Medium, "Setup"),
    entry(
        "Set up version control",
        "Developer",
        TaskPriority::High,
        "Setup",
    ),
];

const E_COMMERCE: [CatalogEntry; 4] = [
    entry(
        "Design database schema",
        "Developer",
        TaskPriority::High,
        "Database",
    ),
    entry(
        "Implement user authentication",
        "Developer",
        TaskPriority::High,
        "Backend",
    ),
    entry(
        "Create product listing page",
        "Developer",
        TaskPriority::Medium,
        "Frontend",
    ),
    entry(
        "Implement shopping cart functionality",
        "Developer",
        TaskPriority::High,
        "Frontend",
    ),
];

const AI: [CatalogEntry; 4] = [
    entry(
        "Set up machine learning environment",
        "Developer",
        TaskPriority::High,
        "Setup",
    ),
    entry(
        "Implement data preprocessing pipeline",
        "Developer",
        TaskPriority::High,
        "Backend",
    ),
    entry(
        "Develop model training script",
        "Developer",
        TaskPriority::High,
        "Backend",
    ),
    entry(
        "Create model evaluation metrics",
        "Developer",
        TaskPriority::Medium,
        "Backend",
    ),
];

const OTHER: [CatalogEntry; 4] = [
    entry(
        "Define project requirements",
        "Researcher",
        TaskPriority::High,
        "Setup",
    ),
    entry(
        "Create project timeline",
        "Developer",
        TaskPriority::Medium,
        "Setup",
    ),
    entry(
        "Set up basic frontend structure",
        "Developer",
        TaskPriority::Medium,
        "Frontend",
    ),
    entry(
        "Set up basic backend structure",
        "Developer",
        TaskPriority::Medium,
        "Backend",
    ),
];

fn template_tasks(template_key: &str) -> &'static [CatalogEntry] {
    match template_key {
        "e-commerce" => &E_COMMERCE,
        "ai" => &AI,
        _ => &OTHER,
    }
}

/// Generate the checklist for a new project.
///
/// Returns exactly seven tasks: the three bootstrap tasks, then the four
/// tasks of the catalog entry matching `template_key` (falling back to
/// `other`). All tasks start [`TaskStatus::Pending`] with no subtasks, and
/// carry ids `"1"`..`"7"`.
#[must_use]
pub fn generate(project_name: &str, template_key: &str) -> Vec<Task> {
    debug!(project = %project_name, template = %template_key, "generating task checklist");

    BOOTSTRAP
        .iter()
        .chain(template_tasks(template_key))
        .enumerate()
        .map(|(i, e)| Task {
            id: (i + 1).to_string(),
            description: e.description.to_string(),
            assigned_to: e.assigned_to.to_string(),
            status: TaskStatus::Pending,
            priority: e.priority,
            submodule: e.submodule.to_string(),
            parent_task_id: None,
            subtasks: None,
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
