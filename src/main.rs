use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use eyre::{Context, Result, eyre};
use std::io::Read;
use std::path::{Path, PathBuf};
use taskboard::batch::{BatchRunner, Outcome, parse_batch};
use taskboard::calendar::MonthView;
use taskboard::views::{Dashboard, PriorityStats, Share, StatusCounts, priority_breakdown, status_breakdown};
use taskboard::{Config, Priority, Task, TaskStatus, samples};
use tracing::Level;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Taskboard CLI - in-memory task store with dashboard and statistics views")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to a config file (default: <config dir>/taskboard/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show task counts and the most recent tasks
    Dashboard {
        /// Show every task instead of the first few
        #[arg(long)]
        all: bool,

        /// Start from an empty board
        #[arg(long)]
        no_seed: bool,
    },

    /// Run a YAML/JSON list of operations against a fresh store ("-" reads stdin)
    Batch { file: PathBuf },

    /// Print a month grid for picking due dates
    Calendar {
        /// Month as YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
    },

    /// Show status and priority breakdowns
    Stats {
        /// Start from an empty board
        #[arg(long)]
        no_seed: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    // Setup tracing
    let level = match cli.verbose {
        0 => config.level()?,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let today = chrono::Local::now().date_naive();
    let mut store = config.build_store();

    match cli.command {
        Commands::Dashboard { all, no_seed } => {
            if config.seed_samples && !no_seed {
                samples::seed(&mut store, today);
            }
            let dashboard = Dashboard::build(store.all(), config.dashboard_limit, all);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                print_dashboard(&dashboard);
            }
        }
        Commands::Batch { file } => {
            let content = read_input(&file)?;
            let ops = parse_batch(&content)?;
            let outcomes = BatchRunner::new().run_all(&mut store, ops);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcomes)?);
            } else {
                for outcome in &outcomes {
                    print_outcome(outcome);
                }
            }
        }
        Commands::Calendar { month } => {
            let view = match month {
                Some(month) => parse_month(&month)?,
                None => MonthView::containing(today),
            };
            if cli.json {
                let json = serde_json::json!({
                    "title": view.title(),
                    "cells": view.cells(),
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            } else {
                print_calendar(&view, today);
            }
        }
        Commands::Stats { no_seed } => {
            if config.seed_samples && !no_seed {
                samples::seed(&mut store, today);
            }
            let counts = StatusCounts::from_tasks(store.all());
            let statuses = status_breakdown(store.all());
            let priorities = priority_breakdown(store.all());
            if cli.json {
                let json = serde_json::json!({
                    "counts": counts,
                    "completionRate": counts.completion_rate(),
                    "statuses": statuses,
                    "priorities": priorities,
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            } else {
                print_stats(&counts, &statuses, &priorities);
            }
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read operations from stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn parse_month(s: &str) -> Result<MonthView> {
    let (year, month) = s
        .split_once('-')
        .ok_or_else(|| eyre!("Invalid month: {} (expected YYYY-MM)", s))?;
    let year: i32 = year.parse().with_context(|| format!("Invalid year in {}", s))?;
    let month: u32 = month.parse().with_context(|| format!("Invalid month in {}", s))?;
    MonthView::new(year, month)
}

// ============================================================================
// Text output
// ============================================================================

fn status_label(status: TaskStatus) -> ColoredString {
    match status {
        TaskStatus::Pending => status.as_str().yellow(),
        TaskStatus::InProgress => status.as_str().blue(),
        TaskStatus::Completed => status.as_str().green(),
    }
}

fn priority_label(priority: Priority) -> ColoredString {
    match priority {
        Priority::High => priority.as_str().red(),
        Priority::Medium => priority.as_str().yellow(),
        Priority::Low => priority.as_str().cyan(),
    }
}

fn print_task(task: &Task) {
    let priority = task
        .priority
        .map(|p| format!(" [{}]", priority_label(p)))
        .unwrap_or_default();
    println!("  {} {}{}", task.title.bold(), status_label(task.status), priority);
    println!("    id: {}  due: {}", task.id.dimmed(), task.due_date);
    if let Some(description) = &task.description {
        println!("    {}", description);
    }
}

fn print_dashboard(dashboard: &Dashboard) {
    let counts = &dashboard.counts;
    println!("{}", "Today's overview".bold());
    println!(
        "  {} {}   {} {}   {} {}",
        counts.pending.to_string().bold(),
        status_label(TaskStatus::Pending),
        counts.in_progress.to_string().bold(),
        status_label(TaskStatus::InProgress),
        counts.completed.to_string().bold(),
        status_label(TaskStatus::Completed),
    );
    println!();

    if dashboard.displayed.is_empty() {
        println!("No tasks yet");
        return;
    }

    println!("{}", "Recent tasks".bold());
    for task in &dashboard.displayed {
        print_task(task);
    }
    if dashboard.can_view_all {
        println!("  ... run with --all to view all {} tasks", counts.total());
    }
}

fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Created { task } => {
            println!("{}", "created".green());
            print_task(task);
        }
        Outcome::Updated { task } => {
            println!("{}", "updated".blue());
            print_task(task);
        }
        Outcome::Deleted { id, removed } => {
            if *removed {
                println!("{} {}", "deleted".red(), id);
            } else {
                println!("{} {} (no such task)", "unchanged".dimmed(), id);
            }
        }
        Outcome::Found { task } => {
            println!("{}", "found".cyan());
            print_task(task);
        }
        Outcome::NotFound { id } => println!("{} {}", "not found".yellow(), id),
        Outcome::Tasks { tasks } => {
            println!("{} task(s)", tasks.len().to_string().bold());
            for task in tasks {
                print_task(task);
            }
        }
        Outcome::Stats {
            counts,
            statuses,
            priorities,
        } => print_stats(counts, statuses, priorities),
        Outcome::Rejected { error } => println!("{} {}", "rejected".red().bold(), error),
    }
}

fn print_stats(counts: &StatusCounts, statuses: &[Share], priorities: &[PriorityStats]) {
    println!("{}", "Tasks by status".bold());
    for share in statuses {
        println!("  {:<12} {:>3}  {:>3}%", share.label, share.count, share.percentage);
    }
    println!("  completion rate: {}%", counts.completion_rate());
    println!();

    println!("{}", "Tasks by priority".bold());
    for stats in priorities {
        println!(
            "  {:<8} {:>3} completed  {:>3} pending",
            stats.priority.as_str(),
            stats.completed,
            stats.pending
        );
    }
}

fn print_calendar(view: &MonthView, today: chrono::NaiveDate) {
    println!("{}", view.title().bold());
    println!("Su Mo Tu We Th Fr Sa");
    for week in view.cells().chunks(7) {
        let line: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                Some(day) if view.is_today(*day, today) => format!("{:>2}", day).reversed().to_string(),
                Some(day) => format!("{:>2}", day),
                None => "  ".to_string(),
            })
            .collect();
        println!("{}", line.join(" "));
    }
}
