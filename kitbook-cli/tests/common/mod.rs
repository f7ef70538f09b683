//! Common test utilities for CLI integration tests.
//!
//! Every test gets its own data directory with a user config that makes
//! `iryna` the club head, so equipment can be added through the CLI.

use assert_cmd::Command;
use chrono::{Days, Local, NaiveDate};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Roster written to `<data_dir>/config.yaml`.
pub const CLUB_CONFIG: &str = "\
members:
  iryna: [Head]
  bohdan: [equipment manager]
  taras: [Member]
";

/// Test environment with isolated data directory.
pub struct TestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the kitbook data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment with the club roster in place.
    pub fn new() -> Self {
        let env = Self::empty();
        std::fs::create_dir_all(&env.data_dir).expect("Failed to create data dir");
        std::fs::write(env.data_dir.join("config.yaml"), CLUB_CONFIG)
            .expect("Failed to write club config");
        env
    }

    /// Create a test environment whose data directory does not exist yet.
    pub fn empty() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("kitbook-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// A command with no flags and no inherited `KITBOOK_*` identity.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("kitbook").expect("Failed to find kitbook binary");
        cmd.env_remove("KITBOOK_USER")
            .env_remove("KITBOOK_DATA_DIR")
            .env_remove("KITBOOK_OUTPUT_FORMAT")
            .current_dir(&self.temp_path);
        cmd
    }

    /// A command with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// A command acting as `user`.
    pub fn as_user(&self, user: &str) -> Command {
        let mut cmd = self.command();
        cmd.arg("--user").arg(user);
        cmd
    }

    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Add equipment as the club head and return its id.
    pub fn add_equipment(&self, name: &str) -> i64 {
        let output = self
            .as_user("iryna")
            .args(["equipment", "add", "--name", name, "--weight", "2.5"])
            .output()
            .expect("Failed to run equipment add");

        assert!(
            output.status.success(),
            "Equipment add failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        parse_id(&String::from_utf8_lossy(&output.stdout))
    }

    /// Book `equipment` for `user` and return the raw command output.
    pub fn book(
        &self,
        user: &str,
        equipment: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> std::process::Output {
        self.as_user(user)
            .arg("book")
            .arg("--equipment")
            .arg(equipment.to_string())
            .arg("--start")
            .arg(start.to_string())
            .arg("--end")
            .arg(end.to_string())
            .output()
            .expect("Failed to run book command")
    }

    /// Book and return the new booking id, panicking on failure.
    pub fn book_ok(&self, user: &str, equipment: i64, start: NaiveDate, end: NaiveDate) -> i64 {
        let output = self.book(user, equipment, start, end);
        assert!(
            output.status.success(),
            "Book failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        parse_id(&String::from_utf8_lossy(&output.stdout))
    }

    /// Move a stored booking to `[start, end]`, bypassing the booking rules.
    ///
    /// Used to put bookings in the past, which `book` refuses to do.
    pub fn move_booking(&self, booking: i64, start: NaiveDate, end: NaiveDate) {
        let conn = rusqlite::Connection::open(self.data_dir.join("kitbook.db"))
            .expect("Failed to open database");
        let changed = conn
            .execute(
                "UPDATE reservations SET start_date = ?1, end_date = ?2 WHERE id = ?3",
                rusqlite::params![start.to_string(), end.to_string(), booking],
            )
            .expect("Failed to move booking");
        assert_eq!(changed, 1, "booking {booking} not found");
    }

    /// Run `bookings` with extra arguments and return stdout.
    pub fn bookings(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .arg("bookings")
            .args(args)
            .output()
            .expect("Failed to run bookings command");

        assert!(
            output.status.success(),
            "Bookings failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an id printed on stdout.
#[allow(dead_code)]
pub fn parse_id(output: &str) -> i64 {
    output.trim().parse().expect("Output is not a valid id")
}

#[allow(dead_code)]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[allow(dead_code)]
pub fn plus(days: u64) -> NaiveDate {
    today() + Days::new(days)
}

#[allow(dead_code)]
pub fn minus(days: u64) -> NaiveDate {
    today() - Days::new(days)
}
