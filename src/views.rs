// Derived views over a task snapshot
//
// Everything here is a pure function of `&[Task]`; nothing is cached in the store.

use crate::models::{Priority, Task, TaskStatus};
use serde::Serialize;

/// Number of tasks the dashboard shows before "view all"
pub const DEFAULT_DASHBOARD_LIMIT: usize = 3;

/// Task counts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl StatusCounts {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut counts, task| {
            match task.status {
                TaskStatus::Pending => counts.pending += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Completed => counts.completed += 1,
            }
            counts
        })
    }

    pub fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
        }
    }

    pub fn total(&self) -> usize {
        self.pending + self.in_progress + self.completed
    }

    /// Completed share of all tasks as a rounded percentage; 0 when empty
    pub fn completion_rate(&self) -> u32 {
        percentage(self.completed, self.total())
    }
}

/// One slice of a breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Share {
    pub label: String,
    pub count: usize,
    pub percentage: u32,
}

/// Completed vs. outstanding tasks for one priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriorityStats {
    pub priority: Priority,
    pub completed: usize,
    /// Not yet completed (pending or in progress)
    pub pending: usize,
}

impl PriorityStats {
    pub fn total(&self) -> usize {
        self.completed + self.pending
    }
}

/// What the dashboard renders from one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub counts: StatusCounts,
    pub displayed: Vec<Task>,
    /// More tasks exist than are displayed
    pub can_view_all: bool,
}

impl Dashboard {
    /// Build the dashboard; `view_all` lifts the limit
    pub fn build(tasks: &[Task], limit: usize, view_all: bool) -> Self {
        let displayed = if view_all { tasks.to_vec() } else { top(tasks, limit) };
        Self {
            counts: StatusCounts::from_tasks(tasks),
            can_view_all: !view_all && tasks.len() > limit,
            displayed,
        }
    }
}

/// The first `n` tasks in store order
pub fn top(tasks: &[Task], n: usize) -> Vec<Task> {
    tasks.iter().take(n).cloned().collect()
}

/// Count and share of each status, in declaration order
pub fn status_breakdown(tasks: &[Task]) -> Vec<Share> {
    let counts = StatusCounts::from_tasks(tasks);
    TaskStatus::ALL
        .iter()
        .map(|&status| {
            let count = counts.get(status);
            Share {
                label: status.to_string(),
                count,
                percentage: percentage(count, counts.total()),
            }
        })
        .collect()
}

/// Completed and outstanding counts per priority, highest first
///
/// Tasks without a priority are left out.
pub fn priority_breakdown(tasks: &[Task]) -> Vec<PriorityStats> {
    Priority::DESCENDING
        .iter()
        .map(|&priority| {
            let (completed, pending) = tasks
                .iter()
                .filter(|t| t.priority == Some(priority))
                .fold((0, 0), |(done, open), t| {
                    if t.status == TaskStatus::Completed {
                        (done + 1, open)
                    } else {
                        (done, open + 1)
                    }
                });
            PriorityStats {
                priority,
                completed,
                pending,
            }
        })
        .collect()
}

/// `part / whole` as a percentage rounded half up; 0 for an empty whole
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part * 200 + whole) / (whole * 2)) as u32
}
