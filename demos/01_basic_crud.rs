//! Demo 01: Basic CRUD Operations
//!
//! This demo walks one task through add, get, update and delete, using a
//! hand-driven clock and sequential ids so the output is reproducible.
//!
//! Run with: cargo run --example 01_basic_crud

use chrono::{Duration, TimeZone, Utc};
use eyre::{Result, eyre};
use taskboard::{ManualClock, NewTask, Priority, SequentialIds, TaskPatch, TaskStatus, TaskStore};

fn main() -> Result<()> {
    let start = Utc
        .with_ymd_and_hms(2025, 11, 30, 9, 0, 0)
        .single()
        .ok_or_else(|| eyre!("invalid start time"))?;
    let clock = ManualClock::new(start);
    let mut store = TaskStore::with_parts(clock.clone(), SequentialIds::new("task"));

    println!("Taskboard Basic CRUD Demo");
    println!("=========================\n");

    // ADD
    println!("1. ADD - Creating a task...");
    let task = store.add(
        NewTask::new("Write report", TaskStatus::Pending, "Dec 1, 2025")
            .description("Quarterly numbers for the team")
            .priority(Priority::High),
    );
    println!("   Created {} at {}\n", task.id, task.created_at);

    // GET
    println!("2. GET - Looking the task up...");
    match store.get(&task.id) {
        Some(found) => println!("   Found: {} ({})\n", found.title, found.status),
        None => println!("   Task not found!\n"),
    }

    // UPDATE
    println!("3. UPDATE - Completing the task an hour later...");
    clock.advance(Duration::hours(1));
    match store.update(&task.id, TaskPatch::new().status(TaskStatus::Completed)) {
        Some(updated) => {
            println!("   Status: {}", updated.status);
            println!("   created_at: {}", updated.created_at);
            println!("   updated_at: {}\n", updated.updated_at);
        }
        None => println!("   Task no longer exists\n"),
    }

    // LIST
    println!("4. LIST - Adding another task and listing...");
    store.add(NewTask::new("Review PR", TaskStatus::InProgress, "Dec 2, 2025"));
    for task in store.all() {
        println!("   - {} : {} [{}]", task.id, task.title, task.status);
    }
    println!();

    // DELETE
    println!("5. DELETE - Removing the first task...");
    println!("   Removed: {}", store.delete(&task.id));
    println!("   Removed again: {}", store.delete(&task.id));
    println!("   Still exists: {}\n", store.get(&task.id).is_some());

    println!("Demo complete!");
    Ok(())
}
