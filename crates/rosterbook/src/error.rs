//! Error types for rosterbook.
//!
//! This module defines all error types used throughout the rosterbook crate,
//! separating user-facing record errors from storage and configuration failures.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for rosterbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Record Errors ===
    /// A record with this roll number is already stored.
    #[error("roll no {roll} already exists")]
    DuplicateRoll {
        /// The roll number that collided.
        roll: String,
    },

    /// The roll number field was left blank.
    #[error("roll no is required")]
    MissingRoll,

    /// The contact number is not exactly ten digits.
    #[error("contact must be 10 digits, got '{value}'")]
    InvalidContact {
        /// The rejected input.
        value: String,
    },

    /// The date of birth is not a valid `DD-MM-YYYY` date.
    #[error("date of birth must be a valid DD-MM-YYYY date, got '{value}'")]
    InvalidDate {
        /// The rejected input.
        value: String,
    },

    /// The gender value is not one of the known options.
    #[error("unknown gender '{0}' (expected Male, Female or Others)")]
    UnknownGender(String),

    /// The selected record no longer exists in the store.
    #[error("no record with roll no {roll}")]
    RollNotFound {
        /// The roll number that was looked up.
        roll: String,
    },

    // === Editor / Browser Errors ===
    /// Update or delete was attempted without a selected row.
    #[error("no record selected")]
    NoSelection,

    /// A row index outside the visible listing was selected.
    #[error("row {index} is out of range ({len} rows listed)")]
    RowOutOfRange {
        /// The requested row.
        index: usize,
        /// Number of rows currently visible.
        len: usize,
    },

    /// The requested search or edit field does not exist.
    #[error("unknown field '{0}'")]
    UnknownSearchField(String),

    /// An interactive command could not be understood.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for rosterbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a duplicate roll error.
    #[must_use]
    pub fn duplicate_roll(roll: impl Into<String>) -> Self {
        Self::DuplicateRoll { roll: roll.into() }
    }

    /// Create a roll not found error.
    #[must_use]
    pub fn roll_not_found(roll: impl Into<String>) -> Self {
        Self::RollNotFound { roll: roll.into() }
    }

    /// Create an invalid command error.
    #[must_use]
    pub fn invalid_command(message: impl Into<String>) -> Self {
        Self::InvalidCommand(message.into())
    }

    /// Check if this error is a field format failure caught before the store.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::MissingRoll
                | Self::InvalidContact { .. }
                | Self::InvalidDate { .. }
                | Self::UnknownGender(_)
        )
    }

    /// Check if this error indicates a roll number collision.
    #[must_use]
    pub fn is_duplicate_roll(&self) -> bool {
        matches!(self, Self::DuplicateRoll { .. })
    }

    /// Check if this error is something the user caused and can correct,
    /// as opposed to a storage or configuration failure.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        self.is_validation_error()
            || matches!(
                self,
                Self::DuplicateRoll { .. }
                    | Self::RollNotFound { .. }
                    | Self::NoSelection
                    | Self::RowOutOfRange { .. }
                    | Self::UnknownSearchField(_)
                    | Self::InvalidCommand(_)
            )
    }
}
