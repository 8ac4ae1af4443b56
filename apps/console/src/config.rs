//! Console configuration.
//!
//! Command line arguments (with environment fallbacks) resolved into the
//! settings the console needs at startup.

use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;

/// Default tracing filter when neither `--log` nor `QUILL_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Bookstore inventory and sales console.
#[derive(Debug, Parser)]
#[command(name = "quill", version, about)]
pub struct Cli {
    /// SQLite database file (created if missing)
    #[arg(long, value_name = "PATH", env = "QUILL_DB_PATH")]
    pub db: Option<PathBuf>,

    /// Insert a demo catalog and customers into an empty database
    #[arg(long)]
    pub seed: bool,

    /// Log filter, e.g. `debug` or `quill_db=trace` (logs go to stderr)
    #[arg(long, value_name = "FILTER", env = "QUILL_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log: String,
}

/// Resolved console settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Seed demo data before showing the menu
    pub seed: bool,

    /// tracing-subscriber filter directive
    pub log_filter: String,
}

impl ConsoleConfig {
    /// Resolves the arguments, falling back to the platform data directory
    /// for the database path.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let database_path = match cli.db {
            Some(path) => path,
            None => default_database_path()?,
        };

        Ok(ConsoleConfig {
            database_path,
            seed: cli.seed,
            log_filter: cli.log,
        })
    }
}

/// Determines the database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/org.quill.quill/quill.db`
/// - **Windows**: `%APPDATA%\quill\quill\data\quill.db`
/// - **Linux**: `~/.local/share/quill/quill.db`
pub fn default_database_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "quill", "quill").ok_or(ConfigError::NoDataDir)?;

    let data_dir = proj_dirs.data_dir();

    // Create directory if it doesn't exist
    std::fs::create_dir_all(data_dir).map_err(|e| ConfigError::DataDir {
        path: data_dir.to_path_buf(),
        source: e,
    })?;

    Ok(data_dir.join("quill.db"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine app data directory; pass --db or set QUILL_DB_PATH")]
    NoDataDir,

    #[error("Could not create data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
