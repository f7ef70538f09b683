//! Utility functions for CLI operations.
//!
//! Data directory resolution, configuration loading, database access and
//! the helpers shared by the output formatters.

use crate::error::CliError;
use chrono::{DateTime, Local, NaiveDate, Utc};
use kitbook::config::OutputFormat as ConfiguredFormat;
use kitbook::database::DATABASE_FILE;
use kitbook::{Config, ConfigBuilder, Database, DatabaseConfig, UserId};
use std::path::PathBuf;
use std::time::Duration;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Member acting on this request.
    pub user: Option<String>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Resolve the data directory: `--data-dir`, then `$KITBOOK_DATA_DIR`,
/// then `~/.kitbook`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => kitbook::database::resolve_data_dir()
            .map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// The user config is read from the resolved data directory; club files are
/// found by walking up from the current directory.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;

    ConfigBuilder::new()
        .with_data_dir(&data_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is
/// disabled by flag or configuration.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE);

    let autoinit_disabled = global.disable_autoinit || config.disable_autoinit.unwrap_or(false);
    if !db_path.exists() && autoinit_disabled {
        return Err(CliError::NoDataDirectory);
    }

    let mut db_config = DatabaseConfig::new(db_path);

    if let Some(timeout_seconds) = global.busy_timeout {
        db_config = db_config.with_busy_timeout(Duration::from_secs(timeout_seconds.into()));
    } else if let Some(timeout_seconds) = config.maximum_lock_wait_seconds {
        db_config = db_config.with_busy_timeout(Duration::from_secs(timeout_seconds));
    }

    Database::open(db_config).map_err(CliError::from)
}

/// The member acting on this request.
///
/// # Errors
///
/// Returns `InvalidArguments` when neither `--user` nor `KITBOOK_USER` is set.
pub fn require_user(global: &GlobalOptions) -> Result<UserId, CliError> {
    let name = global.user.as_deref().ok_or_else(|| {
        CliError::InvalidArguments("this command needs --user NAME or KITBOOK_USER".to_string())
    })?;
    UserId::new(name).map_err(|e| CliError::InvalidArguments(e.to_string()))
}

/// Today's date on the local clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Output format for list commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated values)
    Tsv,
}

impl OutputFormat {
    /// The format picked on the command line, else the configured one, else
    /// a table.
    pub fn resolve(flag: Option<Self>, config: &Config) -> Self {
        flag.or_else(|| config.output_format.map(Self::from))
            .unwrap_or(Self::Table)
    }
}

impl From<ConfiguredFormat> for OutputFormat {
    fn from(format: ConfiguredFormat) -> Self {
        match format {
            ConfiguredFormat::Table => Self::Table,
            ConfiguredFormat::Json => Self::Json,
            ConfiguredFormat::Csv => Self::Csv,
            ConfiguredFormat::Tsv => Self::Tsv,
        }
    }
}

/// Convert csv::Error to CliError.
pub fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Convert serde_json::Error to CliError.
pub fn json_error(e: serde_json::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Print a plan preview for `--dry-run`.
pub fn print_dry_run(global: &GlobalOptions, plan: &kitbook::OperationPlan) {
    if global.quiet {
        return;
    }
    eprintln!("Dry run - would perform the following actions:");
    for (i, action) in plan.actions.iter().enumerate() {
        eprintln!("  {}. {}", i + 1, action.description());
    }
    if !plan.warnings.is_empty() {
        eprintln!("Warnings:");
        for warning in &plan.warnings {
            eprintln!("  - {warning}");
        }
    }
}
