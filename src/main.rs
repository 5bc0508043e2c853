//! WorkTask CLI entry point.

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use worktask::cli::{CheckCommand, Cli, Command, DepCommand};
use worktask::config::Config;
use worktask::db::Database;
use worktask::types::{
    ChecklistPatch, NewChecklistItem, NewTask, Priority, Status, TaskFilter, TaskPatch,
    TicketImport,
};

fn parse_priority(value: Option<String>) -> Result<Option<Priority>> {
    value
        .map(|s| {
            Priority::parse(&s)
                .ok_or_else(|| anyhow!("unknown priority '{s}' (expected low, medium, high, urgent)"))
        })
        .transpose()
}

fn parse_status(value: Option<String>) -> Result<Option<Status>> {
    value
        .map(|s| {
            Status::parse(&s).ok_or_else(|| {
                anyhow!("unknown status '{s}' (expected todo, in_progress, done, blocked)")
            })
        })
        .transpose()
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(database) = cli.database {
        config.database = database;
    }

    if let Some(parent) = config.database.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    debug!(database = %config.database.display(), "opening database");
    let db = Database::open(&config.database)?;

    match cli.command {
        Command::List(args) => {
            let filter = TaskFilter {
                status: parse_status(args.status)?,
                priority: parse_priority(args.priority)?,
                date_from: args.from,
                date_to: args.to,
                search: args.search,
            };
            print_json(&db.list_tasks(&filter)?)?;
        }
        Command::Show { id } => {
            print_json(&db.get_task(id)?)?;
        }
        Command::Add(args) => {
            let task = db.create_task(NewTask {
                title: args.title,
                description: args.description,
                due_date: args.due,
                assigned_date: args.assigned,
                priority: parse_priority(args.priority)?,
                status: parse_status(args.status)?,
                ticket_id: args.ticket_id,
                ticket_url: args.ticket_url,
                notes: args.notes,
            })?;
            print_json(&task)?;
        }
        Command::Edit(args) => {
            let task = db.update_task(
                args.id,
                TaskPatch {
                    title: args.title,
                    description: args.description,
                    due_date: args.due,
                    assigned_date: args.assigned,
                    priority: parse_priority(args.priority)?,
                    status: parse_status(args.status)?,
                    ticket_id: args.ticket_id,
                    ticket_url: args.ticket_url,
                    notes: args.notes,
                },
            )?;
            print_json(&task)?;
        }
        Command::Rm { id } => {
            db.delete_task(id)?;
            println!("deleted task {id}");
        }
        Command::Check(command) => match command {
            CheckCommand::Add {
                task_id,
                title,
                stage,
                branch,
            } => {
                let item = db.add_checklist_item(
                    task_id,
                    NewChecklistItem {
                        title,
                        stage,
                        git_branch: branch,
                        completed: None,
                    },
                )?;
                print_json(&item)?;
            }
            CheckCommand::Edit {
                id,
                title,
                stage,
                branch,
                completed,
                order,
            } => {
                let item = db.update_checklist_item(
                    id,
                    ChecklistPatch {
                        title,
                        stage,
                        git_branch: branch,
                        completed,
                        order,
                    },
                )?;
                print_json(&item)?;
            }
            CheckCommand::Rm { id } => {
                db.delete_checklist_item(id)?;
                println!("deleted checklist item {id}");
            }
        },
        Command::Dep(command) => match command {
            DepCommand::Add { task_id, on } => {
                let edge = db.add_dependency(task_id, on, &config.dependencies)?;
                print_json(&edge)?;
            }
            DepCommand::Rm { id } => {
                db.delete_dependency(id)?;
                println!("deleted dependency {id}");
            }
        },
        Command::Stats => {
            print_json(&db.dashboard_stats()?)?;
        }
        Command::Import(args) => {
            let task = db.import_ticket(TicketImport {
                title: args.title,
                description: args.description,
                ticket_id: args.ticket_id,
                ticket_url: args.ticket_url,
                priority: parse_priority(args.priority)?,
                assigned_date: args.assigned,
                due_date: args.due,
            })?;
            print_json(&task)?;
        }
    }

    Ok(())
}
