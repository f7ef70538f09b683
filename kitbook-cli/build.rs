//! Build script for kitbook-cli.
//!
//! Generates the man page at build time using clap_mangen and places it in
//! OUT_DIR for inclusion in release builds.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! structure is declared here a second time.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("kitbook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Book club equipment")
        .long_about(
            "Command-line tool for booking club equipment, with overlap, date and duration checks",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("KITBOOK_DATA_DIR"),
        )
        .arg(
            Arg::new("user")
                .long("user")
                .help("Member acting on this request")
                .value_name("NAME")
                .global(true)
                .env("KITBOOK_USER"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("KITBOOK_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(ArgAction::SetTrue)
                .env("KITBOOK_DISABLE_AUTOINIT"),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize the data directory and database")
                .long_about("Create the kitbook database and optionally a configuration file"),
            Command::new("book")
                .about("Book a piece of equipment for a period")
                .long_about(
                    "Check the booking rules and store the booking for the acting member",
                ),
            Command::new("cancel")
                .about("Cancel a booking")
                .long_about("Cancel your own booking, or any booking with a privileged position"),
            Command::new("bookings")
                .about("List bookings")
                .long_about("Display bookings as a table, JSON, CSV or TSV"),
            Command::new("purge")
                .about("Remove bookings that have ended")
                .long_about("Delete every booking whose last day is before today"),
            Command::new("equipment")
                .about("Manage the equipment inventory")
                .long_about("Add, list, show, edit, re-assign and remove equipment")
                .subcommands(vec![
                    Command::new("add").about("Add a piece of equipment"),
                    Command::new("list").about("List all equipment"),
                    Command::new("show").about("Show one piece of equipment and its bookings"),
                    Command::new("update").about("Edit name, weight, description or categories"),
                    Command::new("set-holder").about("Assign the equipment to a member"),
                    Command::new("remove").about("Remove equipment together with its bookings"),
                ]),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check a kitbook configuration file for errors"),
            Command::new("show-data-dir")
                .about("Show the resolved data directory path")
                .long_about("Display the path to the kitbook data directory"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "OUT_DIR is not set")
    })?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("kitbook.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
