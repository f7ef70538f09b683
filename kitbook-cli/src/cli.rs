//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    BookCommand, BookingsCommand, CancelCommand, CompletionsCommand, EquipmentCommand,
    InitCommand, PurgeCommand, ShowDataDirCommand, ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for booking club equipment.
#[derive(Parser)]
#[command(name = "kitbook")]
#[command(version, about = "Book club equipment", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "KITBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Member acting on this request
    #[arg(long, value_name = "NAME", global = true, env = "KITBOOK_USER")]
    pub user: Option<String>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "KITBOOK_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "KITBOOK_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Book a piece of equipment for a period
    Book(BookCommand),

    /// Cancel a booking
    Cancel(CancelCommand),

    /// List bookings
    Bookings(BookingsCommand),

    /// Remove bookings that have ended
    Purge(PurgeCommand),

    /// Manage the equipment inventory
    #[command(subcommand)]
    Equipment(EquipmentCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Show the resolved data directory path
    ShowDataDir(ShowDataDirCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
