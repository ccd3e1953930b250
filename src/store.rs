// In-memory task store

use crate::clock::{Clock, IdGenerator, SystemClock, UuidV7Ids, format_timestamp};
use crate::filter::Filter;
use crate::models::{NewTask, Task, TaskPatch, TaskStatus};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// Authoritative, volatile registry of tasks
///
/// One instance per running application, owned by whoever drives it and
/// lent to collaborators. Every mutation goes through `&mut self`, so
/// operations cannot interleave.
///
/// Tasks are kept most-recent-first: `add` inserts at the front and `update`
/// leaves positions alone.
pub struct TaskStore {
    tasks: Vec<Task>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl TaskStore {
    /// Empty store on the wall clock with UUID v7 ids
    pub fn new() -> Self {
        Self::with_parts(SystemClock, UuidV7Ids)
    }

    /// Empty store with explicit time and id sources
    pub fn with_parts(clock: impl Clock + 'static, ids: impl IdGenerator + 'static) -> Self {
        Self {
            tasks: Vec::new(),
            clock: Box::new(clock),
            ids: Box::new(ids),
        }
    }

    // ========================================================================
    // CRUD API
    // ========================================================================

    /// All tasks in store order
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Create a task at the front of the store
    ///
    /// The title is taken as given; see [`crate::validate`] for the check
    /// collaborators run before calling this.
    pub fn add(&mut self, input: NewTask) -> Task {
        let id = self.fresh_id();
        let now = format_timestamp(self.clock.now());

        let task = Task {
            id,
            title: input.title,
            description: input.description,
            status: input.status,
            due_date: input.due_date,
            priority: input.priority,
            created_at: now.clone(),
            updated_at: now,
        };

        debug!(id = %task.id, status = %task.status, "add: created task");
        self.tasks.insert(0, task.clone());
        task
    }

    /// Merge `patch` into the task with `id`
    ///
    /// Returns `None` if no such task exists. `id` and `created_at` are never
    /// touched; `updated_at` is refreshed even for an empty patch.
    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Option<Task> {
        let now = self.clock.now();
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(id, "update: task not found");
            return None;
        };

        patch.apply(task);
        task.updated_at = Self::advance_timestamp(&task.updated_at, now);

        debug!(id, status = %task.status, updated_at = %task.updated_at, "update: task updated");
        Some(task.clone())
    }

    /// Remove the task with `id`, returning whether one was removed
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() < before;

        debug!(id, removed, "delete: called");
        removed
    }

    /// Get a task by id
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks with exactly `status`, in store order
    pub fn by_status(&self, status: TaskStatus) -> Vec<Task> {
        self.tasks.iter().filter(|t| t.status == status).cloned().collect()
    }

    /// Tasks matching every filter, in store order
    pub fn list(&self, filters: &[Filter]) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| filters.iter().all(|f| f.matches(t)))
            .cloned()
            .collect()
    }

    /// Number of tasks held
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the store holds no tasks
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn fresh_id(&mut self) -> String {
        let mut id = self.ids.next_id();
        // Never hand out an id the store already holds
        while self.get(&id).is_some() {
            warn!(id = %id, "fresh_id: generated id already in use, drawing another");
            id = self.ids.next_id();
        }
        id
    }

    /// `now`, formatted, unless that would move `previous` backwards
    fn advance_timestamp(previous: &str, now: DateTime<Utc>) -> String {
        let candidate = format_timestamp(now);
        if candidate.as_str() < previous {
            warn!(previous, candidate = %candidate, "clock moved backwards, keeping previous updated_at");
            return previous.to_string();
        }
        candidate
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskStore").field("tasks", &self.tasks).finish_non_exhaustive()
    }
}
