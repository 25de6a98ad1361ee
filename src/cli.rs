//! CLI argument parsing for the task tracker.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tasks",
    about = "Track tasks in a local JSON file",
    version,
    after_help = "Without a subcommand an interactive menu is started.\nLogs are written to: ~/.local/share/taskbook/logs/tasks.log"
)]
pub struct Cli {
    /// Path to the tasks file (default: tasks_file from config, else ./tasks.json)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Path to a YAML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a new task
    Add {
        /// Task title
        #[arg(short, long)]
        title: String,

        /// Task description
        #[arg(short = 'D', long)]
        description: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,
    },

    /// List all tasks
    List,

    /// Show one task
    Show {
        /// Task ID
        id: String,
    },

    /// Change a task's title, description or due date
    Update {
        /// Task ID
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short = 'D', long)]
        description: Option<String>,

        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },

    /// Mark a task complete
    Complete {
        /// Task ID
        id: String,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
