// Query filtering over tasks

use crate::models::Task;
use eyre::{Result, eyre};
use std::fmt;
use std::str::FromStr;

/// Filter for selecting tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Field to filter on
    pub field: TaskField,
    /// Comparison operator
    pub op: FilterOp,
    /// Value to compare against
    pub value: String,
}

/// Task fields a filter can look at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    Description,
    Status,
    Priority,
    DueDate,
}

/// Comparison operators for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,       // ==
    Ne,       // !=
    Contains, // case-insensitive substring
}

impl Filter {
    pub fn new(field: TaskField, op: FilterOp, value: impl Into<String>) -> Self {
        Self {
            field,
            op,
            value: value.into(),
        }
    }

    /// Whether `task` satisfies this filter
    ///
    /// Status and priority compare case-insensitively and ignore `_`/space
    /// differences. A missing optional field only satisfies `Ne`.
    pub fn matches(&self, task: &Task) -> bool {
        let Some(actual) = self.field.value_of(task) else {
            return self.op == FilterOp::Ne;
        };

        match self.op {
            FilterOp::Eq => self.field.normalize(&actual) == self.field.normalize(&self.value),
            FilterOp::Ne => self.field.normalize(&actual) != self.field.normalize(&self.value),
            FilterOp::Contains => actual.to_lowercase().contains(&self.value.to_lowercase()),
        }
    }
}

impl TaskField {
    fn value_of(self, task: &Task) -> Option<String> {
        match self {
            TaskField::Title => Some(task.title.clone()),
            TaskField::Description => task.description.clone(),
            TaskField::Status => Some(task.status.as_str().to_string()),
            TaskField::Priority => task.priority.map(|p| p.as_str().to_string()),
            TaskField::DueDate => Some(task.due_date.clone()),
        }
    }

    fn normalize(self, value: &str) -> String {
        match self {
            TaskField::Status | TaskField::Priority => value
                .chars()
                .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
                .collect::<String>()
                .to_lowercase(),
            _ => value.to_string(),
        }
    }
}

impl FromStr for TaskField {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(TaskField::Title),
            "description" => Ok(TaskField::Description),
            "status" => Ok(TaskField::Status),
            "priority" => Ok(TaskField::Priority),
            "due_date" | "duedate" | "due" => Ok(TaskField::DueDate),
            _ => Err(eyre!("Unknown task field: {}", s)),
        }
    }
}

impl FromStr for Filter {
    type Err = eyre::Report;

    /// Parse `field=value`, `field!=value` or `field~value`
    fn from_str(s: &str) -> Result<Self> {
        let (field, op, value) = if let Some((field, value)) = s.split_once("!=") {
            (field, FilterOp::Ne, value)
        } else if let Some((field, value)) = s.split_once('~') {
            (field, FilterOp::Contains, value)
        } else if let Some((field, value)) = s.split_once('=') {
            (field, FilterOp::Eq, value)
        } else {
            return Err(eyre!("Invalid filter: {} (expected field=value, field!=value or field~value)", s));
        };

        Ok(Filter::new(field.parse()?, op, value.trim()))
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskField::Title => write!(f, "title"),
            TaskField::Description => write!(f, "description"),
            TaskField::Status => write!(f, "status"),
            TaskField::Priority => write!(f, "priority"),
            TaskField::DueDate => write!(f, "due_date"),
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOp::Eq => write!(f, "="),
            FilterOp::Ne => write!(f, "!="),
            FilterOp::Contains => write!(f, "~"),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.field, self.op, self.value)
    }
}
