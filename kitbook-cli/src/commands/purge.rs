//! Purge command implementation.
//!
//! Removes bookings whose last day is before today.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, today, GlobalOptions};
use clap::Args;
use kitbook::CleanupOperations;

/// Remove bookings that have ended.
#[derive(Args)]
pub struct PurgeCommand {
    /// Perform a dry run (show what would be removed without removing)
    #[arg(long)]
    pub dry_run: bool,
}

impl PurgeCommand {
    /// Execute the purge command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let result = CleanupOperations::purge_expired(&mut db, today(), self.dry_run)?;

        let prefix = if self.dry_run { "[DRY RUN] Would remove" } else { "Removed" };
        if global.quiet {
            if result.removed_count > 0 {
                println!("{}", result.removed_count);
            }
        } else if global.verbose {
            eprintln!("{prefix} {} booking(s):", result.removed_count);
            for reservation in &result.removed_reservations {
                eprintln!(
                    "  - Booking {}: equipment {} for {} ({} to {})",
                    reservation
                        .id()
                        .map_or_else(|| "-".to_string(), |id| id.to_string()),
                    reservation.equipment(),
                    reservation.owner(),
                    reservation.start(),
                    reservation.end()
                );
            }
        } else {
            eprintln!("{prefix} {} ended booking(s)", result.removed_count);
        }

        Ok(())
    }
}
