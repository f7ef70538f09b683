//! Bookings command implementation.
//!
//! Displays stored bookings in various formats (table, JSON, CSV, TSV).

use crate::error::CliError;
use crate::utils::{
    csv_error, format_timestamp, json_error, load_configuration, open_database, GlobalOptions,
    OutputFormat,
};
use clap::Args;
use kitbook::{Database, EquipmentId, Reservation, UserId};
use std::io::Write;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 6] = ["id", "equipment", "owner", "start", "end", "created_at"];

/// List bookings.
#[derive(Args)]
pub struct BookingsCommand {
    /// Output format (default: configured format, else table)
    #[arg(long, value_enum, env = "KITBOOK_OUTPUT_FORMAT", ignore_case = true)]
    pub format: Option<OutputFormat>,

    /// Only bookings of this equipment
    #[arg(long, value_name = "ID")]
    pub equipment: Option<i64>,

    /// Only bookings made by this member
    #[arg(long = "owner", value_name = "NAME")]
    pub owner: Option<String>,
}

impl BookingsCommand {
    /// Execute the bookings command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let mut reservations = match self.equipment {
            Some(id) => {
                Database::list_reservations_for_equipment(db.connection(), EquipmentId::new(id))?
            }
            None => Database::list_all_reservations(db.connection())?,
        };

        if let Some(ref owner) = self.owner {
            let owner =
                UserId::new(owner).map_err(|e| CliError::InvalidArguments(e.to_string()))?;
            reservations.retain(|r| r.owner() == &owner);
        }

        match OutputFormat::resolve(self.format, &config) {
            OutputFormat::Table => format_as_table(&reservations)?,
            OutputFormat::Json => format_as_json(&reservations)?,
            OutputFormat::Csv => format_as_delimited(&reservations, b',')?,
            OutputFormat::Tsv => format_as_delimited(&reservations, b'\t')?,
        }

        Ok(())
    }
}

fn id_string(reservation: &Reservation) -> String {
    reservation
        .id()
        .map_or_else(|| "-".to_string(), |id| id.to_string())
}

/// Format bookings as a human-readable table.
fn format_as_table(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for res in reservations {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}",
            id_string(res),
            res.equipment(),
            res.owner(),
            res.start(),
            res.end(),
            format_timestamp(res.created_at()),
        )?;
    }

    Ok(())
}

/// Format bookings as JSON.
fn format_as_json(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let json_data: Vec<serde_json::Value> = reservations
        .iter()
        .map(|r| {
            serde_json::json!({
                "id": r.id(),
                "equipment": r.equipment(),
                "owner": r.owner().as_str(),
                "start": r.start(),
                "end": r.end(),
                "created_at": format_timestamp(r.created_at()),
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut handle, &json_data).map_err(json_error)?;
    writeln!(handle)?;

    Ok(())
}

/// Format bookings as delimited output (CSV or TSV).
fn format_as_delimited(reservations: &[Reservation], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;

    for res in reservations {
        writer
            .write_record(&[
                id_string(res),
                res.equipment().to_string(),
                res.owner().to_string(),
                res.start().to_string(),
                res.end().to_string(),
                format_timestamp(res.created_at()),
            ])
            .map_err(csv_error)?;
    }

    writer.flush()?;

    Ok(())
}
