// Scripted store operations
//
// A batch is a YAML (or JSON) sequence of operations run in order against one
// store. `add` may name its task with `as: <label>`; later operations refer to
// it as `@<label>`.

use crate::filter::Filter;
use crate::models::{NewTask, Task, TaskPatch, TaskStatus};
use crate::store::TaskStore;
use crate::validate::{validate_new_task, validate_patch};
use crate::views::{PriorityStats, Share, StatusCounts, priority_breakdown, status_breakdown};
use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    Add {
        #[serde(default, rename = "as")]
        label: Option<String>,
        task: NewTask,
    },
    Update {
        id: String,
        patch: TaskPatch,
    },
    Delete {
        id: String,
    },
    Get {
        id: String,
    },
    List {
        #[serde(default)]
        filters: Vec<String>,
    },
    ByStatus {
        status: TaskStatus,
    },
    Stats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    Created {
        task: Task,
    },
    Updated {
        task: Task,
    },
    Deleted {
        id: String,
        removed: bool,
    },
    Found {
        task: Task,
    },
    NotFound {
        id: String,
    },
    Tasks {
        tasks: Vec<Task>,
    },
    Stats {
        counts: StatusCounts,
        statuses: Vec<Share>,
        priorities: Vec<PriorityStats>,
    },
    /// The operation was refused before reaching the store
    Rejected {
        error: String,
    },
}

pub fn parse_batch(content: &str) -> Result<Vec<Op>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml::from_str(content).context("Failed to parse batch operations")
}

/// Runs operations against one store, remembering labels across calls
#[derive(Debug, Default)]
pub struct BatchRunner {
    labels: HashMap<String, String>,
}

impl BatchRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every operation; a rejected one does not stop the rest
    pub fn run_all(&mut self, store: &mut TaskStore, ops: Vec<Op>) -> Vec<Outcome> {
        ops.into_iter()
            .map(|op| match self.run(store, op) {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(error = %e, "Batch operation rejected");
                    Outcome::Rejected { error: format!("{:#}", e) }
                }
            })
            .collect()
    }

    pub fn run(&mut self, store: &mut TaskStore, op: Op) -> Result<Outcome> {
        debug!(?op, "run: called");

        let outcome = match op {
            Op::Add { label, task } => {
                validate_new_task(&task)?;
                let task = store.add(task);
                if let Some(label) = label {
                    self.labels.insert(label, task.id.clone());
                }
                Outcome::Created { task }
            }
            Op::Update { id, patch } => {
                validate_patch(&patch)?;
                let id = self.resolve(&id)?;
                match store.update(&id, patch) {
                    Some(task) => Outcome::Updated { task },
                    None => Outcome::NotFound { id },
                }
            }
            Op::Delete { id } => {
                let id = self.resolve(&id)?;
                let removed = store.delete(&id);
                Outcome::Deleted { id, removed }
            }
            Op::Get { id } => {
                let id = self.resolve(&id)?;
                match store.get(&id) {
                    Some(task) => Outcome::Found { task: task.clone() },
                    None => Outcome::NotFound { id },
                }
            }
            Op::List { filters } => {
                let filters = filters
                    .iter()
                    .map(|f| f.parse::<Filter>())
                    .collect::<Result<Vec<_>>>()?;
                Outcome::Tasks {
                    tasks: store.list(&filters),
                }
            }
            Op::ByStatus { status } => Outcome::Tasks {
                tasks: store.by_status(status),
            },
            Op::Stats => Outcome::Stats {
                counts: StatusCounts::from_tasks(store.all()),
                statuses: status_breakdown(store.all()),
                priorities: priority_breakdown(store.all()),
            },
        };

        Ok(outcome)
    }

    fn resolve(&self, id: &str) -> Result<String> {
        match id.strip_prefix('@') {
            Some(label) => self
                .labels
                .get(label)
                .cloned()
                .ok_or_else(|| eyre!("Unknown task label: @{}", label)),
            None => Ok(id.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ManualClock, SequentialIds};
    use chrono::{TimeZone, Utc};

    fn test_store() -> TaskStore {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 11, 30, 9, 0, 0).unwrap());
        TaskStore::with_parts(clock, SequentialIds::default())
    }

    const SCRIPT: &str = r#"
- op: add
  as: report
  task:
    title: Write report
    status: Pending
    dueDate: Dec 1, 2025
- op: add
  task:
    title: Review PR
    status: In Progress
    dueDate: Dec 2, 2025
    priority: High
- op: update
  id: "@report"
  patch:
    status: Completed
- op: by_status
  status: Completed
- op: delete
  id: "@report"
- op: get
  id: "@report"
- op: list
  filters: ["title~review"]
- op: stats
"#;

    #[test]
    fn test_parse_batch() {
        let ops = parse_batch(SCRIPT).unwrap();
        assert_eq!(ops.len(), 8);
        assert!(matches!(&ops[0], Op::Add { label: Some(l), .. } if l == "report"));
        assert_eq!(ops[7], Op::Stats);
        assert!(parse_batch("").unwrap().is_empty());
        assert!(parse_batch("- op: explode").is_err());
    }

    #[test]
    fn test_run_script() {
        let mut store = test_store();
        let outcomes = BatchRunner::new().run_all(&mut store, parse_batch(SCRIPT).unwrap());

        assert!(matches!(&outcomes[0], Outcome::Created { task } if task.id == "task-1"));
        assert!(matches!(&outcomes[2], Outcome::Updated { task } if task.status == TaskStatus::Completed));
        assert!(matches!(&outcomes[3], Outcome::Tasks { tasks } if tasks.len() == 1));
        assert_eq!(
            outcomes[4],
            Outcome::Deleted {
                id: "task-1".to_string(),
                removed: true
            }
        );
        assert_eq!(
            outcomes[5],
            Outcome::NotFound {
                id: "task-1".to_string()
            }
        );
        assert!(matches!(&outcomes[6], Outcome::Tasks { tasks } if tasks[0].title == "Review PR"));
        assert!(matches!(&outcomes[7], Outcome::Stats { counts, .. } if counts.in_progress == 1));
    }

    #[test]
    fn test_rejections_do_not_stop_the_batch() {
        let mut store = test_store();
        let ops = parse_batch(
            r#"
- op: add
  task: {title: "  ", status: Pending, dueDate: ""}
- op: delete
  id: "@missing"
- op: list
  filters: ["colour=red"]
- op: add
  task: {title: Valid, status: Pending, dueDate: ""}
"#,
        )
        .unwrap();

        let outcomes = BatchRunner::new().run_all(&mut store, ops);
        assert!(matches!(&outcomes[0], Outcome::Rejected { error } if error.contains("title cannot be empty")));
        assert!(matches!(&outcomes[1], Outcome::Rejected { error } if error.contains("@missing")));
        assert!(matches!(&outcomes[2], Outcome::Rejected { .. }));
        assert!(matches!(&outcomes[3], Outcome::Created { .. }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_outcome_json_shape() {
        let json = serde_json::to_value(Outcome::Deleted {
            id: "task-9".to_string(),
            removed: false,
        })
        .unwrap();
        assert_eq!(json["result"], "deleted");
        assert_eq!(json["removed"], false);
    }
}
