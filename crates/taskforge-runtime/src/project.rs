//! Current-project state holder.
//!
//! Exactly one project is current at a time. It is created when the user
//! confirms a generated checklist, replaced wholesale on each new creation,
//! and destroyed only by [`ProjectService::clear_project`]. Mutations that
//! reference an unknown task id, or that arrive while no project exists,
//! are silent no-ops — callers are expected to only reference known ids.
//!
//! Each accepted mutation clones the snapshot, edits the clone, swaps it in
//! behind the lock, and then writes the full snapshot to the
//! `currentProject` slot. Readers holding a previous [`Arc<Project>`] keep
//! an unchanged view.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use taskforge_core::types::{Project, Task, TaskPriority, TaskStatus};
use taskforge_store::{CURRENT_PROJECT_SLOT, SlotStore, SlotStoreExt};

/// Category labels every freshly created project starts with.
const DEFAULT_SUBMODULES: [&str; 4] = ["Setup", "Frontend", "Backend", "Database"];

/// Root under which the informational project path is derived.
const DEFAULT_PROJECT_ROOT: &str = "/home/project/taskforge";

/// Owner of the current project and all of its tasks.
pub struct ProjectService {
    store: Arc<dyn SlotStore>,
    current: RwLock<Option<Arc<Project>>>,
}

impl ProjectService {
    /// Create a service backed by `store`, restoring the persisted project
    /// if the `currentProject` slot holds one.
    pub fn new(store: Arc<dyn SlotStore>) -> Self {
        let current = match store.get_json::<Project>(CURRENT_PROJECT_SLOT) {
            Ok(project) => project.map(Arc::new),
            Err(e) => {
                warn!(error = %e, "failed to restore current project, starting without one");
                None
            }
        };
        Self {
            store,
            current: RwLock::new(current),
        }
    }

    /// Snapshot of the current project, if any.
    #[must_use]
    pub fn current(&self) -> Option<Arc<Project>> {
        self.current.read().clone()
    }

    /// Create a new current project from a confirmed checklist, replacing
    /// any previous project wholesale.
    pub fn create_project(&self, name: &str, tasks: Vec<Task>) -> Arc<Project> {
        let project = Arc::new(Project {
            id: chrono::Utc::now().timestamp_millis().to_string(),
            name: name.to_string(),
            path: format!("{DEFAULT_PROJECT_ROOT}/{name}"),
            tasks,
            submodules: DEFAULT_SUBMODULES.iter().map(ToString::to_string).collect(),
        });

        *self.current.write() = Some(Arc::clone(&project));
        self.persist(&project);
        debug!(project = %project.name, id = %project.id, "project created");
        project
    }

    /// Replace the entire top-level task list of the current project.
    pub fn set_project_tasks(&self, tasks: Vec<Task>) {
        self.mutate(|project| {
            project.tasks = tasks;
            true
        });
    }

    /// Set the status of the task with `task_id`, wherever it sits in the
    /// two-level tree. Unknown ids are ignored.
    pub fn update_status(&self, task_id: &str, status: TaskStatus) {
        self.mutate(|project| match find_task_mut(&mut project.tasks, task_id) {
            Some(task) => {
                task.status = status;
                true
            }
            None => false,
        });
    }

    /// Set the priority of the task with `task_id`. Unknown ids are ignored.
    pub fn update_priority(&self, task_id: &str, priority: TaskPriority) {
        self.mutate(|project| match find_task_mut(&mut project.tasks, task_id) {
            Some(task) => {
                task.priority = priority;
                true
            }
            None => false,
        });
    }

    /// Append a new top-level task to the current project.
    pub fn add_task(&self, task: Task) {
        self.mutate(|project| {
            project.tasks.push(task);
            true
        });
    }

    /// Drop the current project and remove its durable slot.
    pub fn clear_project(&self) {
        *self.current.write() = None;
        if let Err(e) = self.store.remove(CURRENT_PROJECT_SLOT) {
            warn!(error = %e, "failed to clear persisted project");
        }
    }

    /// Clone-edit-swap, then mirror the new snapshot to the store.
    ///
    /// `edit` returns whether anything changed; untouched projects are
    /// neither swapped nor re-persisted. With no current project this is a
    /// no-op.
    fn mutate(&self, edit: impl FnOnce(&mut Project) -> bool) {
        let mut guard = self.current.write();
        let Some(current) = guard.as_ref() else {
            return;
        };

        let mut next = Project::clone(current);
        if !edit(&mut next) {
            return;
        }

        let next = Arc::new(next);
        *guard = Some(Arc::clone(&next));
        drop(guard);
        self.persist(&next);
    }

    /// Full-snapshot overwrite of the `currentProject` slot. Best effort:
    /// a failed write leaves the durable copy stale, in-memory state stays
    /// authoritative.
    fn persist(&self, project: &Project) {
        if let Err(e) = self.store.put_json(CURRENT_PROJECT_SLOT, project) {
            warn!(error = %e, "failed to persist project snapshot");
        }
    }
}

/// Locate a task by id, searching top-level tasks and one subtask level.
fn find_task_mut<'a>(tasks: &'a mut [Task], task_id: &str) -> Option<&'a mut Task> {
    for task in tasks.iter_mut() {
        if task.id == task_id {
            return Some(task);
        }
        if let Some(subtasks) = task.subtasks.as_mut() {
            if let Some(subtask) = subtasks.iter_mut().find(|s| s.id == task_id) {
                return Some(subtask);
            }
        }
    }
    None
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use taskforge_core::templates::generate;
    use taskforge_store::MemoryStore;

    fn service() -> (ProjectService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (ProjectService::new(Arc::clone(&store) as _), store)
    }

    fn task(id: &str) -> Task {
        Task {
            id: id.to_string(),
            description: format!("Task {id}"),
            assigned_to: "Developer".to_string(),
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            submodule: "Setup".to_string(),
            parent_task_id: None,
            subtasks: None,
        }
    }

    fn task_with_subtasks(id: &str, sub_ids: &[&str]) -> Task {
        let mut parent = task(id);
        parent.subtasks = Some(
            sub_ids
                .iter()
                .map(|sid| {
                    let mut sub = task(sid);
                    sub.parent_task_id = Some(id.to_string());
                    sub
                })
                .collect(),
        );
        parent
    }

    #[test]
    fn create_project_seeds_submodules_and_persists() {
        let (service, store) = service();
        let project = service.create_project("Shop", generate("Shop", "e-commerce"));

        assert_eq!(project.name, "Shop");
        assert_eq!(project.tasks.len(), 7);
        assert_eq!(
            project.submodules,
            ["Setup", "Frontend", "Backend", "Database"]
        );
        assert!(project.path.ends_with("/Shop"));

        let persisted: Project = store.get_json(CURRENT_PROJECT_SLOT).unwrap().unwrap();
        assert_eq!(persisted, *project);
    }

    #[test]
    fn project_is_restored_from_store() {
        let store = Arc::new(MemoryStore::new());
        {
            let service = ProjectService::new(Arc::clone(&store) as _);
            let _ = service.create_project("Shop", generate("Shop", "e-commerce"));
        }
        let service = ProjectService::new(store as _);
        let restored = service.current().unwrap();
        assert_eq!(restored.name, "Shop");
        assert_eq!(restored.tasks.len(), 7);
    }

    #[test]
    fn create_replaces_previous_project_wholesale() {
        let (service, _) = service();
        let _ = service.create_project("First", vec![task("1")]);
        let _ = service.create_project("Second", vec![task("1"), task("2")]);

        let current = service.current().unwrap();
        assert_eq!(current.name, "Second");
        assert_eq!(current.tasks.len(), 2);
    }

    #[test]
    fn update_status_reaches_top_level_tasks() {
        let (service, store) = service();
        let _ = service.create_project("P", vec![task("1"), task("2")]);

        service.update_status("2", TaskStatus::InProgress);

        let current = service.current().unwrap();
        assert_eq!(current.tasks[0].status, TaskStatus::Pending);
        assert_eq!(current.tasks[1].status, TaskStatus::InProgress);

        let persisted: Project = store.get_json(CURRENT_PROJECT_SLOT).unwrap().unwrap();
        assert_eq!(persisted.tasks[1].status, TaskStatus::InProgress);
    }

    #[test]
    fn update_subtask_leaves_parent_and_siblings_alone() {
        let (service, _) = service();
        let _ = service.create_project("P", vec![task_with_subtasks("1", &["2", "3"])]);

        service.update_status("2", TaskStatus::Completed);

        let current = service.current().unwrap();
        let parent = &current.tasks[0];
        assert_eq!(parent.status, TaskStatus::Pending, "parent must not change");
        let subtasks = parent.subtasks.as_ref().unwrap();
        assert_eq!(subtasks[0].status, TaskStatus::Completed);
        assert_eq!(subtasks[1].status, TaskStatus::Pending, "sibling must not change");
    }

    #[test]
    fn update_priority_is_symmetric_to_status() {
        let (service, _) = service();
        let _ = service.create_project("P", vec![task_with_subtasks("1", &["2"])]);

        service.update_priority("2", TaskPriority::High);

        let current = service.current().unwrap();
        assert_eq!(current.tasks[0].priority, TaskPriority::Medium);
        assert_eq!(
            current.tasks[0].subtasks.as_ref().unwrap()[0].priority,
            TaskPriority::High
        );
    }

    #[test]
    fn unknown_task_id_leaves_project_unchanged() {
        let (service, _) = service();
        let _ = service.create_project("P", vec![task_with_subtasks("1", &["2"])]);
        let before = service.current().unwrap();

        service.update_status("99", TaskStatus::Completed);
        service.update_priority("99", TaskPriority::Low);

        assert_eq!(*service.current().unwrap(), *before);
    }

    #[test]
    fn mutations_without_project_are_no_ops() {
        let (service, store) = service();

        service.update_status("1", TaskStatus::Completed);
        service.update_priority("1", TaskPriority::High);
        service.add_task(task("1"));
        service.set_project_tasks(vec![task("1")]);

        assert!(service.current().is_none());
        assert!(store.get(CURRENT_PROJECT_SLOT).unwrap().is_none());
    }

    #[test]
    fn add_task_appends_and_preserves_order() {
        let (service, _) = service();
        let _ = service.create_project("P", vec![task("1"), task("2")]);

        let mut new_task = task("3");
        new_task.id = service.current().unwrap().next_task_id();
        service.add_task(new_task);

        let current = service.current().unwrap();
        let ids: Vec<&str> = current.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn set_project_tasks_replaces_whole_list() {
        let (service, _) = service();
        let _ = service.create_project("P", vec![task("1"), task("2")]);

        service.set_project_tasks(vec![task("9")]);

        let current = service.current().unwrap();
        assert_eq!(current.tasks.len(), 1);
        assert_eq!(current.tasks[0].id, "9");
        assert_eq!(current.name, "P", "non-task fields survive");
    }

    #[test]
    fn clear_project_removes_slot() {
        let (service, store) = service();
        let _ = service.create_project("P", vec![task("1")]);

        service.clear_project();

        assert!(service.current().is_none());
        assert!(store.get(CURRENT_PROJECT_SLOT).unwrap().is_none());
    }

    #[test]
    fn readers_keep_their_snapshot_across_mutations() {
        let (service, _) = service();
        let _ = service.create_project("P", vec![task("1")]);

        let snapshot = service.current().unwrap();
        service.update_status("1", TaskStatus::Completed);

        assert_eq!(snapshot.tasks[0].status, TaskStatus::Pending);
        assert_eq!(
            service.current().unwrap().tasks[0].status,
            TaskStatus::Completed
        );
    }
}
