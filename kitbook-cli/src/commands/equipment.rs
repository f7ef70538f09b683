//! Equipment inventory commands.
//!
//! `list` and `show` are open to every member; adding, editing,
//! re-assigning and removing equipment need a privileged position.

use crate::error::CliError;
use crate::utils::{
    csv_error, format_timestamp, json_error, load_configuration, open_database, require_user,
    today, GlobalOptions, OutputFormat,
};
use clap::{Args, Subcommand};
use kitbook::operations::EquipmentOperations;
use kitbook::{ConfigAuthorizer, Equipment, EquipmentChanges, EquipmentId, NewEquipment, UserId};
use std::io::Write;

const COLUMN_HEADERS: [&str; 5] = ["id", "name", "weight_kg", "categories", "holder"];

/// Manage the equipment inventory.
#[derive(Subcommand)]
pub enum EquipmentCommand {
    /// Add a piece of equipment
    Add(AddArgs),

    /// List all equipment (ended bookings are purged first)
    List(ListArgs),

    /// Show one piece of equipment and its bookings
    Show(ShowArgs),

    /// Edit name, weight, description or categories
    Update(UpdateArgs),

    /// Assign the equipment to a member, or clear the holder
    SetHolder(SetHolderArgs),

    /// Remove equipment together with its bookings
    Remove(RemoveArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Equipment name
    #[arg(long)]
    pub name: String,

    /// Weight in kilograms
    #[arg(long, value_name = "KG")]
    pub weight: f64,

    /// Free-form description
    #[arg(long)]
    pub description: Option<String>,

    /// Category name (repeatable)
    #[arg(long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    /// Member currently holding the item
    #[arg(long, value_name = "NAME")]
    pub holder: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Output format (default: configured format, else table)
    #[arg(long, value_enum, env = "KITBOOK_OUTPUT_FORMAT", ignore_case = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Equipment to show
    #[arg(value_name = "ID")]
    pub equipment: i64,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Equipment to edit
    #[arg(value_name = "ID")]
    pub equipment: i64,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New weight in kilograms
    #[arg(long, value_name = "KG")]
    pub weight: Option<f64>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// Replacement category name (repeatable)
    #[arg(long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    /// Remove all categories
    #[arg(long, conflicts_with = "categories")]
    pub clear_categories: bool,
}

#[derive(Args)]
pub struct SetHolderArgs {
    /// Equipment to re-assign
    #[arg(value_name = "ID")]
    pub equipment: i64,

    /// New holder
    #[arg(value_name = "NAME", required_unless_present = "clear")]
    pub holder: Option<String>,

    /// Clear the current holder
    #[arg(long, conflicts_with = "holder")]
    pub clear: bool,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Equipment to remove
    #[arg(value_name = "ID")]
    pub equipment: i64,
}

impl EquipmentCommand {
    /// Execute the selected equipment command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match self {
            Self::Add(args) => add(args, global),
            Self::List(args) => list(&args, global),
            Self::Show(args) => show(&args, global),
            Self::Update(args) => update(args, global),
            Self::SetHolder(args) => set_holder(args, global),
            Self::Remove(args) => remove(&args, global),
        }
    }
}

fn parse_user(name: &str) -> Result<UserId, CliError> {
    UserId::new(name).map_err(|e| CliError::InvalidArguments(e.to_string()))
}

fn add(args: AddArgs, global: &GlobalOptions) -> Result<(), CliError> {
    let user = require_user(global)?;
    let holder = args.holder.as_deref().map(parse_user).transpose()?;

    let mut equipment = NewEquipment::new(args.name, args.weight).holder(holder);
    if let Some(description) = args.description {
        equipment = equipment.description(description);
    }
    for category in args.categories {
        equipment = equipment.category(category);
    }

    let config = load_configuration(global)?;
    let mut db = open_database(global, &config)?;
    let authorizer = ConfigAuthorizer::from_config(&config);

    let id = EquipmentOperations::add(&mut db, &config, &authorizer, &user, equipment)?;

    println!("{id}");
    if !global.quiet {
        eprintln!("Equipment added");
    }
    Ok(())
}

fn list(args: &ListArgs, global: &GlobalOptions) -> Result<(), CliError> {
    let config = load_configuration(global)?;
    let mut db = open_database(global, &config)?;

    let listing = EquipmentOperations::list(&mut db, &config, today())?;
    if listing.purged > 0 && global.verbose {
        eprintln!("Purged {} ended booking(s)", listing.purged);
    }

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    match OutputFormat::resolve(args.format, &config) {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut handle, &listing.equipment).map_err(json_error)?;
            writeln!(handle)?;
        }
        OutputFormat::Table => {
            let header = COLUMN_HEADERS.map(str::to_uppercase).join("\t");
            writeln!(handle, "{header}")?;
            for item in &listing.equipment {
                writeln!(handle, "{}", row(item, "-").join("\t"))?;
            }
        }
        format => {
            let delimiter = if format == OutputFormat::Csv { b',' } else { b'\t' };
            let mut writer = csv::WriterBuilder::new()
                .delimiter(delimiter)
                .from_writer(handle);
            writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;
            for item in &listing.equipment {
                writer.write_record(row(item, "")).map_err(csv_error)?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}

fn row(item: &Equipment, empty: &str) -> [String; 5] {
    [
        item.id.to_string(),
        item.name.clone(),
        item.weight_kg.to_string(),
        item.categories.join(";"),
        item.holder
            .as_ref()
            .map_or_else(|| empty.to_string(), ToString::to_string),
    ]
}

fn show(args: &ShowArgs, global: &GlobalOptions) -> Result<(), CliError> {
    let config = load_configuration(global)?;
    let db = open_database(global, &config)?;

    let details = EquipmentOperations::show(&db, EquipmentId::new(args.equipment))?;

    if args.json {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        serde_json::to_writer_pretty(&mut handle, &details).map_err(json_error)?;
        writeln!(handle)?;
        return Ok(());
    }

    let item = &details.equipment;
    println!("{} (#{})", item.name, item.id);
    println!("Weight: {} kg", item.weight_kg);
    println!("Description: {}", item.description);
    if !item.categories.is_empty() {
        println!("Categories: {}", item.categories.join(", "));
    }
    if let Some(ref holder) = item.holder {
        println!("Held by: {holder}");
    }

    if details.reservations.is_empty() {
        println!("No bookings");
    } else {
        println!("Bookings:");
        for res in &details.reservations {
            println!(
                "  {} to {}  {}  (booked {})",
                res.start(),
                res.end(),
                res.owner(),
                format_timestamp(res.created_at())
            );
        }
    }

    Ok(())
}

fn update(args: UpdateArgs, global: &GlobalOptions) -> Result<(), CliError> {
    let user = require_user(global)?;

    let mut changes = EquipmentChanges::default();
    if let Some(name) = args.name {
        changes = changes.name(name);
    }
    if let Some(weight) = args.weight {
        changes = changes.weight_kg(weight);
    }
    if let Some(description) = args.description {
        changes = changes.description(description);
    }
    if args.clear_categories {
        changes = changes.categories(Vec::<String>::new());
    } else if !args.categories.is_empty() {
        changes = changes.categories(args.categories);
    }
    if changes.is_empty() {
        return Err(CliError::InvalidArguments(
            "nothing to change: pass --name, --weight, --description, --category or --clear-categories"
                .into(),
        ));
    }

    let config = load_configuration(global)?;
    let mut db = open_database(global, &config)?;
    let authorizer = ConfigAuthorizer::from_config(&config);

    let updated = EquipmentOperations::update(
        &mut db,
        &config,
        &authorizer,
        &user,
        EquipmentId::new(args.equipment),
        changes,
    )?;

    if !global.quiet {
        eprintln!("Equipment {} updated ({})", updated.id, updated.name);
    }
    Ok(())
}

fn set_holder(args: SetHolderArgs, global: &GlobalOptions) -> Result<(), CliError> {
    let user = require_user(global)?;
    let holder = if args.clear {
        None
    } else {
        args.holder.as_deref().map(parse_user).transpose()?
    };

    let config = load_configuration(global)?;
    let mut db = open_database(global, &config)?;
    let authorizer = ConfigAuthorizer::from_config(&config);

    EquipmentOperations::set_holder(
        &mut db,
        &config,
        &authorizer,
        &user,
        EquipmentId::new(args.equipment),
        holder.as_ref(),
    )?;

    if !global.quiet {
        match holder {
            Some(holder) => eprintln!("Equipment {} is now held by {holder}", args.equipment),
            None => eprintln!("Equipment {} has no holder", args.equipment),
        }
    }
    Ok(())
}

fn remove(args: &RemoveArgs, global: &GlobalOptions) -> Result<(), CliError> {
    let user = require_user(global)?;
    let config = load_configuration(global)?;
    let mut db = open_database(global, &config)?;
    let authorizer = ConfigAuthorizer::from_config(&config);

    let removed = EquipmentOperations::remove(
        &mut db,
        &config,
        &authorizer,
        &user,
        EquipmentId::new(args.equipment),
    )?;

    if !global.quiet {
        eprintln!(
            "Removed equipment {} and {removed} booking(s)",
            args.equipment
        );
    }
    Ok(())
}
