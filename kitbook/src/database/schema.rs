//! Database schema definitions and SQL constants.

/// Current schema version for the database.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Key-value store for database metadata such as the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// Equipment inventory.
pub const CREATE_EQUIPMENT_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS equipment (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        weight_kg REAL NOT NULL CHECK (weight_kg >= 0),
        description TEXT NOT NULL,
        holder TEXT,
        created_at INTEGER NOT NULL
    )";

/// Category names attached to equipment.
pub const CREATE_EQUIPMENT_CATEGORIES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS equipment_categories (
        equipment_id INTEGER NOT NULL REFERENCES equipment(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        PRIMARY KEY (equipment_id, name)
    )";

/// Bookings. Dates are stored as ISO-8601 `YYYY-MM-DD` text, which sorts and
/// compares in calendar order.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        equipment_id INTEGER NOT NULL REFERENCES equipment(id) ON DELETE CASCADE,
        owner TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        created_at INTEGER NOT NULL,
        CHECK (start_date <= end_date)
    )";

/// Speeds up the per-equipment overlap check.
pub const CREATE_EQUIPMENT_PERIOD_INDEX: &str = "CREATE INDEX IF NOT EXISTS \
     idx_reservations_equipment_start ON reservations(equipment_id, start_date)";

/// Speeds up the purge of ended bookings.
pub const CREATE_END_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_end_date ON reservations(end_date)";

/// Speeds up per-user listings.
pub const CREATE_OWNER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_owner ON reservations(owner)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Column list shared by every reservation query.
pub const RESERVATION_COLUMNS: &str = "id, equipment_id, owner, start_date, end_date, created_at";

/// Inserts a reservation; the row id is assigned by `SQLite`.
pub const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations (equipment_id, owner, start_date, end_date, created_at)
    VALUES (?, ?, ?, ?, ?)
";

/// Finds the earliest booking of one item that shares a day with `[?2, ?3]`.
pub const SELECT_FIRST_OVERLAP: &str = r"
    SELECT id, equipment_id, owner, start_date, end_date, created_at
    FROM reservations
    WHERE equipment_id = ?1 AND start_date <= ?3 AND end_date >= ?2
    ORDER BY start_date, id
    LIMIT 1
";
