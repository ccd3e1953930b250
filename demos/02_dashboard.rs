//! Demo 02: Dashboard and Statistics
//!
//! This demo seeds the sample tasks, then derives the dashboard summary,
//! status and priority breakdowns, and a filtered subset from one snapshot.
//!
//! Run with: cargo run --example 02_dashboard

use eyre::Result;
use taskboard::calendar::{MonthView, format_due_date};
use taskboard::views::{DEFAULT_DASHBOARD_LIMIT, Dashboard, priority_breakdown, status_breakdown};
use taskboard::{Filter, NewTask, Priority, TaskStatus, TaskStore, samples};

fn main() -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let mut store = TaskStore::new();

    println!("Taskboard Dashboard Demo");
    println!("========================\n");

    samples::seed(&mut store, today);
    store.add(
        NewTask::new("Book dentist", TaskStatus::Pending, format_due_date(today)).priority(Priority::Low),
    );

    // Dashboard: counts plus the first few tasks
    let dashboard = Dashboard::build(store.all(), DEFAULT_DASHBOARD_LIMIT, false);
    println!(
        "Pending: {}  In Progress: {}  Completed: {}",
        dashboard.counts.pending, dashboard.counts.in_progress, dashboard.counts.completed
    );
    for task in &dashboard.displayed {
        println!("  - {} (due {})", task.title, task.due_date);
    }
    if dashboard.can_view_all {
        println!("  ... and {} more", store.len() - dashboard.displayed.len());
    }
    println!();

    // Statistics
    println!("By status:");
    for share in status_breakdown(store.all()) {
        println!("  {:<12} {} ({}%)", share.label, share.count, share.percentage);
    }
    println!("By priority:");
    for stats in priority_breakdown(store.all()) {
        println!("  {:<8} {} completed, {} pending", stats.priority, stats.completed, stats.pending);
    }
    println!();

    // Filtering
    let filters: Vec<Filter> = vec!["priority=high".parse()?, "status!=completed".parse()?];
    println!("High priority, not completed:");
    for task in store.list(&filters) {
        println!("  - {} [{}]", task.title, task.status);
    }
    println!();

    // Calendar
    let month = MonthView::containing(today);
    println!("{} has {} days, starting on weekday {}", month.title(), month.days_in_month(), month.first_weekday());

    Ok(())
}
