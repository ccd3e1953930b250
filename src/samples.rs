// Sample tasks for a fresh board

use crate::calendar::format_due_date;
use crate::models::{NewTask, Priority, Task, TaskStatus};
use crate::store::TaskStore;
use chrono::{Days, NaiveDate};
use tracing::info;

/// The three starter tasks, due relative to `today`
pub fn sample_tasks(today: NaiveDate) -> Vec<NewTask> {
    let due = |days: u64| format_due_date(today.checked_add_days(Days::new(days)).unwrap_or(today));

    vec![
        NewTask::new("Plan weekly schedule", TaskStatus::Pending, due(2))
            .description("Create and prioritize tasks for the upcoming week")
            .priority(Priority::High),
        NewTask::new("Complete project proposal", TaskStatus::InProgress, due(1))
            .description("Finish writing and reviewing the client proposal")
            .priority(Priority::High),
        NewTask::new("Team meeting preparation", TaskStatus::Completed, due(0))
            .description("Prepare agenda and materials for team meeting")
            .priority(Priority::Medium),
    ]
}

/// Add the sample tasks in order, so the last one ends up first
pub fn seed(store: &mut TaskStore, today: NaiveDate) -> Vec<Task> {
    let created: Vec<Task> = sample_tasks(today).into_iter().map(|input| store.add(input)).collect();
    info!(count = created.len(), "Seeded sample tasks");
    created
}
