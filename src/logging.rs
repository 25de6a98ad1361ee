//! File logging for the binaries. The terminal is reserved for the menus.

use crate::config::APP_DIR;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

/// Directory the log files go to.
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("logs")
}

/// Route `log` output to `<log_dir>/<name>.log`, filtered by `RUST_LOG`.
pub fn setup_logging(name: &str) -> Result<PathBuf> {
    let log_dir = log_dir();
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join(format!("{}.log", name));

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .try_init()
        .context("Logger already initialized")?;

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(log_file)
}
