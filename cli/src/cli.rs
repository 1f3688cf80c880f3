use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use taskflow_core::{CategoryId, Priority, PriorityFilter, StatusFilter, TaskId};

/// Organise tasks into categories and track progress.
/// Data lives in memory for the lifetime of one invocation, seeded from the
/// built-in dataset or from --seed.
#[derive(Debug, Parser)]
#[command(name = "taskflow", version, about)]
pub struct Cli {
    /// JSON seed file with `categories` and `tasks` arrays.
    #[arg(long, global = true)]
    pub seed: Option<PathBuf>,

    /// Skip the simulated latency.
    #[arg(long, global = true)]
    pub instant: bool,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Restrict views to one category.
    #[arg(long, global = true)]
    pub category: Option<CategoryId>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Header, progress and statistics for the current selection.
    Summary,

    /// Tasks in display order.
    List {
        /// Case-insensitive title search.
        #[arg(long)]
        search: Option<String>,
        /// all | high | medium | low
        #[arg(long)]
        priority: Option<PriorityFilter>,
        /// all | active | completed
        #[arg(long)]
        status: Option<StatusFilter>,
    },

    /// Categories with their open-task counts.
    Categories,

    /// Add a task, then list.
    Add {
        title: String,
        /// high | medium | low
        #[arg(long)]
        priority: Option<Priority>,
        /// Due date as YYYY-MM-DD.
        #[arg(long)]
        due: Option<NaiveDate>,
    },

    /// Mark a task as done.
    Complete { id: TaskId },

    /// Mark a task as not done.
    Reopen { id: TaskId },

    /// Delete a task.
    Delete { id: TaskId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_filters() {
        let cli = Cli::parse_from([
            "taskflow", "list", "--search", "milk", "--priority", "high", "--status", "active",
        ]);
        match cli.command {
            Command::List {
                search,
                priority,
                status,
            } => {
                assert_eq!(search.as_deref(), Some("milk"));
                assert_eq!(priority, Some(PriorityFilter::Only(Priority::High)));
                assert_eq!(status, Some(StatusFilter::Active));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::parse_from(["taskflow", "summary", "--instant", "--category", "2"]);
        assert!(cli.instant);
        assert_eq!(cli.category, Some(2));
    }

    #[test]
    fn rejects_unknown_priority() {
        assert!(Cli::try_parse_from(["taskflow", "add", "x", "--priority", "urgent"]).is_err());
    }

    #[test]
    fn parses_due_date() {
        let cli = Cli::parse_from(["taskflow", "add", "Pay rent", "--due", "2024-04-01"]);
        match cli.command {
            Command::Add { title, due, .. } => {
                assert_eq!(title, "Pay rent");
                assert_eq!(due, NaiveDate::from_ymd_opt(2024, 4, 1));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
