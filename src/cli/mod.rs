//! CLI command definitions.
//!
//! Thin transport glue over the store: every subcommand maps onto one store
//! operation and prints the result as JSON.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Personal task tracker: tasks, checklists, dependencies, dashboard.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to database file (overrides config)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List tasks, optionally filtered
    List(ListArgs),

    /// Show one task with its checklist and dependencies
    Show { id: i64 },

    /// Create a task
    Add(AddArgs),

    /// Update fields of a task (omitted --due/--assigned clear stored dates)
    Edit(EditArgs),

    /// Delete a task and everything attached to it
    Rm { id: i64 },

    /// Checklist item operations
    #[command(subcommand)]
    Check(CheckCommand),

    /// Dependency edge operations
    #[command(subcommand)]
    Dep(DepCommand),

    /// Dashboard statistics
    Stats,

    /// Construct a task from external ticket fields
    Import(ImportArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Exact status filter (todo, in_progress, done, blocked)
    #[arg(long)]
    pub status: Option<String>,

    /// Exact priority filter (low, medium, high, urgent)
    #[arg(long)]
    pub priority: Option<String>,

    /// Inclusive lower bound on assigned date
    #[arg(long)]
    pub from: Option<String>,

    /// Inclusive upper bound on assigned date
    #[arg(long)]
    pub to: Option<String>,

    /// Substring search across title, description, and ticket id
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    pub title: String,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub due: Option<String>,

    #[arg(long)]
    pub assigned: Option<String>,

    #[arg(long)]
    pub priority: Option<String>,

    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub ticket_id: Option<String>,

    #[arg(long)]
    pub ticket_url: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: i64,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub due: Option<String>,

    #[arg(long)]
    pub assigned: Option<String>,

    #[arg(long)]
    pub priority: Option<String>,

    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub ticket_id: Option<String>,

    #[arg(long)]
    pub ticket_url: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Append a checklist item to a task
    Add {
        task_id: i64,
        title: String,
        #[arg(long)]
        stage: Option<String>,
        #[arg(long)]
        branch: Option<String>,
    },

    /// Update a checklist item
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        stage: Option<String>,
        #[arg(long)]
        branch: Option<String>,
        #[arg(long)]
        completed: Option<bool>,
        #[arg(long)]
        order: Option<i64>,
    },

    /// Delete a checklist item
    Rm { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum DepCommand {
    /// Record that a task depends on another
    Add {
        task_id: i64,
        #[arg(long)]
        on: i64,
    },

    /// Delete a dependency edge by its id
    Rm { id: i64 },
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    #[arg(long)]
    pub ticket_id: Option<String>,

    #[arg(long)]
    pub ticket_url: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub priority: Option<String>,

    #[arg(long)]
    pub assigned: Option<String>,

    #[arg(long)]
    pub due: Option<String>,
}
