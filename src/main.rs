//! Task tracker CLI.

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::io::{self, Write};
use taskbook::console::Console;
use taskbook::logging::setup_logging;
use taskbook::tracker::{write_task_details, write_task_table};
use taskbook::{Config, Confirmation, Deletion, StoreWarning, TaskShell, TaskStore, TaskUpdate};

mod cli;

use cli::{Cli, Command};

fn print_warning(warning: Option<&StoreWarning>) {
    if let Some(warning) = warning {
        eprintln!("{} {}", "Warning:".yellow().bold(), warning);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    let path = cli.file.clone().unwrap_or(config.tasks_file);

    let loaded = TaskStore::load(&path);
    let mut store = loaded.store;

    let Some(command) = cli.command else {
        let stdin = io::stdin();
        let console = Console::new(stdin.lock(), io::stdout());
        let mut shell = TaskShell::new(store, console);
        shell.report_warning(loaded.warning.as_ref())?;
        return shell.run();
    };

    print_warning(loaded.warning.as_ref());

    match command {
        Command::Add {
            title,
            description,
            due,
        } => {
            let created = store.create(&title, &description, &due)?;
            println!("{} Task {} added", "✓".green(), created.value.cyan());
            print_warning(created.warning.as_ref());
        }

        Command::List => {
            let mut stdout = io::stdout().lock();
            write_task_table(&mut stdout, store.list())?;
        }

        Command::Show { id } => {
            let task = store.get(&id)?;
            let mut stdout = io::stdout().lock();
            write_task_details(&mut stdout, &id, task)?;
        }

        Command::Update {
            id,
            title,
            description,
            due,
        } => {
            let changes = TaskUpdate {
                title: title.as_deref(),
                description: description.as_deref(),
                due_date: due.as_deref(),
            };
            let updated = store.update(&id, changes)?;
            println!("{} Task {} updated", "✓".green(), id.cyan());
            print_warning(updated.warning.as_ref());
        }

        Command::Complete { id } => {
            let completed = store.complete(&id)?;
            println!("{} Task {} marked as complete", "✓".green(), id.cyan());
            print_warning(completed.warning.as_ref());
        }

        Command::Delete { id, yes } => {
            // Unknown ids are reported before asking
            store.get(&id)?;

            let confirmation = if yes {
                Confirmation::Yes
            } else {
                print!("Are you sure you want to delete task {}? (y/n): ", id);
                io::stdout().flush()?;
                let mut answer = String::new();
                io::stdin().read_line(&mut answer)?;
                Confirmation::from_answer(&answer)
            };

            match store.delete(&id, confirmation)? {
                Deletion::Removed(removed) => {
                    println!("{} Task {} deleted", "✓".green(), id.cyan());
                    print_warning(removed.warning.as_ref());
                }
                Deletion::Cancelled => println!("{}", "Task deletion cancelled.".dimmed()),
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    setup_logging("tasks").context("Failed to setup logging")?;

    let cli = Cli::parse();
    info!("Command: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
