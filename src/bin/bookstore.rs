//! Bookstore client CLI.

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::io;
use std::path::PathBuf;
use taskbook::logging::setup_logging;
use taskbook::{BookstoreClient, BookstoreShell, Config, Console};

#[derive(Parser)]
#[command(
    name = "bookstore",
    about = "Interactive client for the bookstore catalog API",
    version,
    after_help = "Logs are written to: ~/.local/share/taskbook/logs/bookstore.log"
)]
struct Cli {
    /// Server root, e.g. http://localhost:5000 (default: bookstore.base_url from config)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Path to a YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(base_url) = cli.base_url {
        config.bookstore.base_url = base_url;
    }
    if let Some(timeout) = cli.timeout {
        config.bookstore.timeout_secs = timeout;
    }

    info!("Using bookstore at {}", config.bookstore.base_url);
    let client = BookstoreClient::from_config(&config.bookstore).context("Failed to build HTTP client")?;

    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout());
    BookstoreShell::new(client, console).run()
}

fn main() -> Result<()> {
    setup_logging("bookstore").context("Failed to setup logging")?;

    let cli = Cli::parse();
    info!("Command: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
