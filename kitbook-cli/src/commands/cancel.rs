//! Cancel command implementation.
//!
//! Members may cancel their own bookings; holders of a privileged position
//! may cancel anyone's.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, print_dry_run, require_user, GlobalOptions};
use clap::Args;
use kitbook::operations::{CancelOptions, CancelPlan};
use kitbook::{ConfigAuthorizer, PlanExecutor, ReservationId};

/// Cancel a booking.
#[derive(Args)]
pub struct CancelCommand {
    /// Booking to cancel
    #[arg(value_name = "BOOKING_ID")]
    pub booking: i64,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let user = require_user(global)?;
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let authorizer = ConfigAuthorizer::from_config(&config);

        let options = CancelOptions::new(ReservationId::new(self.booking), user);
        let plan = CancelPlan::new(options, &authorizer, &config).build_plan(&db)?;

        if self.dry_run {
            print_dry_run(global, &plan);
            return Ok(());
        }

        let result = PlanExecutor::new(&mut db).execute(&plan)?;

        if !global.quiet {
            if result.removed_count > 0 {
                eprintln!("Booking cancelled");
            } else {
                eprintln!("No booking found (already cancelled)");
            }
        }

        Ok(())
    }
}
