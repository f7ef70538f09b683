//! CLI-specific error types with exit codes.
//!
//! Library errors are wrapped and mapped onto the exit code table below.

use kitbook::Error as LibError;
use std::fmt;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// Timeout waiting for database lock.
    Timeout,

    /// Database not found and auto-init disabled.
    NoDataDirectory,

    /// Configuration error.
    Config(String),

    /// Semantic failure (e.g., invalid configuration file) - exit code 1.
    SemanticFailure(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Semantic failure (booking rejected, not authorized, conflict)
    /// - 2: Timeout waiting for database lock
    /// - 3: No data directory found
    /// - 4: Invalid arguments
    /// - 5: I/O error
    /// - 6: Other library error
    /// - 7: Configuration error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::SemanticFailure(_) => 1,
            CliError::Library(lib_err) => match lib_err {
                LibError::BookingRejected(_)
                | LibError::NotAuthorized { .. }
                | LibError::ConcurrentConflict { .. } => 1,
                LibError::Validation { .. } => 4,
                LibError::Configuration(_) => 7,
                LibError::Io(_) => 5,
                _ => 6,
            },
            CliError::Timeout => 2,
            CliError::NoDataDirectory => 3,
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
            CliError::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Rejections are shown to members verbatim.
            CliError::Library(LibError::BookingRejected(rejection)) => {
                write!(f, "{}", rejection.message())
            }
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Timeout => write!(f, "Timeout waiting for database lock"),
            CliError::NoDataDirectory => {
                write!(
                    f,
                    "Database not found (run `kitbook init` or enable auto-init)"
                )
            }
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::SemanticFailure(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        match e {
            LibError::LockTimeout { .. } => CliError::Timeout,
            LibError::DataDirectoryNotFound { .. } => CliError::NoDataDirectory,
            other => CliError::Library(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitbook::{BookingRejection, EquipmentId, UserId};

    #[test]
    fn test_rejections_exit_with_semantic_failure() {
        let day = chrono::NaiveDate::from_ymd_opt(2030, 7, 1).unwrap();
        let err = CliError::from(LibError::BookingRejected(BookingRejection::InvalidRange {
            start: day.succ_opt().unwrap(),
            end: day,
        }));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(
            err.to_string(),
            "The start date must not be later than the end date."
        );
    }

    #[test]
    fn test_authorization_and_conflict_are_semantic() {
        let denied = CliError::from(LibError::NotAuthorized {
            user: UserId::new("taras").unwrap(),
            action: "remove equipment".into(),
        });
        assert_eq!(denied.exit_code(), 1);

        let day = chrono::NaiveDate::from_ymd_opt(2030, 7, 1).unwrap();
        let conflict = CliError::from(LibError::ConcurrentConflict {
            equipment: EquipmentId::new(1),
            start: day,
            end: day,
        });
        assert_eq!(conflict.exit_code(), 1);
    }

    #[test]
    fn test_lock_timeout_maps_to_timeout() {
        let err = CliError::from(LibError::LockTimeout { seconds: 5 });
        assert!(matches!(err, CliError::Timeout));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_not_found_is_other_library_error() {
        let err = CliError::from(LibError::NotFound {
            resource: "equipment 9".into(),
        });
        assert_eq!(err.exit_code(), 6);
    }
}
