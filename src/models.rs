// Data models for the task board

use eyre::{Result, eyre};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A unit of work tracked by the store
///
/// Tasks are only ever built by [`crate::TaskStore::add`]; the store owns `id`,
/// `created_at` and `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "inprogress" => Ok(TaskStatus::InProgress),
            "completed" | "complete" | "done" => Ok(TaskStatus::Completed),
            _ => Err(eyre!("Unknown task status: {}", s)),
        }
    }
}

/// Declared low to high so `Ord` ranks High above Low
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Highest first, the order the statistics screen lists them in
    pub const DESCENDING: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" | "med" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(eyre!("Unknown priority: {}", s)),
        }
    }
}

/// Input for [`crate::TaskStore::add`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, status: TaskStatus, due_date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status,
            due_date: due_date.into(),
            priority: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Partial update for [`crate::TaskStore::update`]
///
/// Only mutable fields exist here. Identity keys (`id`, `createdAt`,
/// `updatedAt`) in a deserialized patch are dropped by serde.
///
/// `description` and `priority` are double options: `None` leaves the field
/// alone, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<Option<Priority>>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn priority(mut self, priority: Option<Priority>) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Shallow-merge present fields over `task`
    pub(crate) fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
    }
}

impl From<NewTask> for TaskPatch {
    /// A full replacement, the shape an edit form submits
    fn from(input: NewTask) -> Self {
        Self {
            title: Some(input.title),
            description: Some(input.description),
            status: Some(input.status),
            due_date: Some(input.due_date),
            priority: Some(input.priority),
        }
    }
}

// Distinguishes an explicit `null` (clear) from an absent key (keep)
fn double_option<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task {
            id: "task-1".to_string(),
            title: "Write report".to_string(),
            description: Some("Quarterly numbers".to_string()),
            status: TaskStatus::Pending,
            due_date: "Dec 1, 2025".to_string(),
            priority: Some(Priority::High),
            created_at: "2025-11-30T09:00:00.000Z".to_string(),
            updated_at: "2025-11-30T09:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&TaskStatus::Pending).unwrap(), "\"Pending\"");
        assert_eq!(serde_json::to_string(&TaskStatus::InProgress).unwrap(), "\"In Progress\"");

        let status: TaskStatus = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(status, TaskStatus::InProgress);
    }

    #[test]
    fn test_status_from_str_is_lenient() {
        assert_eq!("pending".parse::<TaskStatus>().unwrap(), TaskStatus::Pending);
        assert_eq!("In Progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("in_progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("COMPLETED".parse::<TaskStatus>().unwrap(), TaskStatus::Completed);
        assert!("archived".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_priority_ordering_and_parse() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
        assert_eq!("medium".parse::<Priority>().unwrap(), Priority::Medium);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_task_uses_camel_case_keys() {
        let json = serde_json::to_value(sample_task()).unwrap();
        assert_eq!(json["dueDate"], "Dec 1, 2025");
        assert_eq!(json["createdAt"], "2025-11-30T09:00:00.000Z");
        assert_eq!(json["status"], "Pending");
        assert!(json.get("due_date").is_none());
    }

    #[test]
    fn test_patch_ignores_identity_keys() {
        let patch: TaskPatch =
            serde_json::from_str(r#"{"id":"other","createdAt":"bogus","updatedAt":"bogus","title":"X"}"#).unwrap();
        assert_eq!(patch, TaskPatch::new().title("X"));
    }

    #[test]
    fn test_patch_null_clears_optional_fields() {
        let patch: TaskPatch = serde_json::from_str(r#"{"description":null,"priority":"Low"}"#).unwrap();
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.priority, Some(Some(Priority::Low)));

        let mut task = sample_task();
        patch.apply(&mut task);
        assert_eq!(task.description, None);
        assert_eq!(task.priority, Some(Priority::Low));
        assert_eq!(task.title, "Write report");
    }

    #[test]
    fn test_patch_absent_keys_preserve_fields() {
        let patch: TaskPatch = serde_json::from_str(r#"{"status":"Completed"}"#).unwrap();
        let mut task = sample_task();
        patch.apply(&mut task);
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.description.as_deref(), Some("Quarterly numbers"));
        assert_eq!(task.priority, Some(Priority::High));
    }

    #[test]
    fn test_empty_patch() {
        assert!(TaskPatch::new().is_empty());
        assert!(!TaskPatch::new().status(TaskStatus::Pending).is_empty());
    }

    #[test]
    fn test_new_task_into_full_patch() {
        let input = NewTask::new("Edit", TaskStatus::InProgress, "Jan 2, 2026");
        let patch = TaskPatch::from(input);
        assert_eq!(patch.title.as_deref(), Some("Edit"));
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.priority, Some(None));
    }
}
