//! Book command implementation.
//!
//! Runs the booking rules for one piece of equipment and, when they pass,
//! stores the reservation for the acting member.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, print_dry_run, require_user, today, GlobalOptions};
use chrono::{Days, NaiveDate};
use clap::Args;
use kitbook::{BookOptions, BookPlan, EquipmentId, PlanExecutor};

/// Book a piece of equipment.
#[derive(Args)]
pub struct BookCommand {
    /// Equipment to book
    #[arg(long, value_name = "ID")]
    pub equipment: i64,

    /// First day of the booking (default: today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub start: Option<NaiveDate>,

    /// Last day of the booking (default: the day after the start)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub end: Option<NaiveDate>,

    /// Check the booking without storing it
    #[arg(long)]
    pub dry_run: bool,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let user = require_user(global)?;
        let today = today();
        let start = self.start.unwrap_or(today);
        let end = match self.end {
            Some(end) => end,
            None => start.checked_add_days(Days::new(1)).ok_or_else(|| {
                CliError::InvalidArguments(format!("no day follows {start}"))
            })?,
        };

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let options =
            BookOptions::new(EquipmentId::new(self.equipment), start, end, user).with_today(today);
        let plan = BookPlan::new(options, &config).build_plan(&db)?;

        if self.dry_run {
            print_dry_run(global, &plan);
            return Ok(());
        }

        let result = PlanExecutor::new(&mut db).execute(&plan)?;

        // The id goes to stdout so scripts can capture it.
        if let Some(id) = result.reservation_id {
            println!("{id}");
        }
        if !global.quiet {
            eprintln!("Equipment booked");
            for warning in &result.warnings {
                eprintln!("Warning: {warning}");
            }
        }

        Ok(())
    }
}
