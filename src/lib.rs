// Taskboard - in-memory task store with derived views for a task-management app

pub mod batch;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod filter;
pub mod models;
pub mod samples;
pub mod store;
pub mod validate;
pub mod views;

// Re-export main types for convenience
pub use clock::{Clock, IdGenerator, ManualClock, SequentialIds, SystemClock, UuidV7Ids};
pub use config::Config;
pub use filter::{Filter, FilterOp, TaskField};
pub use models::{NewTask, Priority, Task, TaskPatch, TaskStatus};
pub use store::TaskStore;
