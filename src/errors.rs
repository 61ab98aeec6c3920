//! Unified error types for the ticket desk.
//!
//! Driver errors coming out of `SeaORM` are classified into explicit kinds on the
//! way in, so callers can tell a dead connection from a constraint collision
//! without string matching. The underlying cause text is always preserved.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Every failure the crate can report.
#[derive(Debug, Error)]
pub enum Error {
    /// The storage backend could not be reached or a connection was lost.
    #[error("Connection error: {message}")]
    Connection {
        /// Underlying driver message
        message: String,
    },

    /// Creating a table (or a storage extension it needs) failed.
    #[error("Schema error on table '{table}': {message}")]
    Schema {
        /// Table being provisioned
        table: String,
        /// Underlying driver message
        message: String,
    },

    /// A uniqueness or foreign-key constraint rejected a write.
    #[error("Constraint violation on table '{table}': {message}")]
    ConstraintViolation {
        /// Table the write targeted, when known
        table: String,
        /// Underlying driver message
        message: String,
    },

    /// A record failed validation before it reached the database.
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the record
        message: String,
    },

    /// A ticket status outside the closed enumeration.
    #[error("Invalid ticket status: '{value}'")]
    InvalidStatus {
        /// The offending value, verbatim
        value: String,
    },

    /// Password hashing or hash parsing failed.
    #[error("Password hashing error: {message}")]
    Hashing {
        /// Underlying hasher message
        message: String,
    },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// Any other database failure.
    #[error("Database error: {message}")]
    Database {
        /// Underlying driver message
        message: String,
    },
}

impl Error {
    /// Re-labels an error raised while provisioning `table`.
    ///
    /// Connection errors keep their kind; constraint violations pick up the
    /// table name; everything else becomes a [`Error::Schema`] failure for that
    /// table.
    #[must_use]
    pub fn for_table(self, table: &str) -> Self {
        match self {
            Self::ConstraintViolation { message, .. } => Self::ConstraintViolation {
                table: table.to_string(),
                message,
            },
            Self::Database { message } => Self::Schema {
                table: table.to_string(),
                message,
            },
            other => other,
        }
    }

    /// Whether this error means the backend itself is unusable.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        let message = err.to_string();

        if matches!(err, DbErr::Conn(_) | DbErr::ConnectionAcquire(_)) {
            return Self::Connection { message };
        }

        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_) | SqlErr::ForeignKeyConstraintViolation(_)) => {
                Self::ConstraintViolation {
                    table: String::new(),
                    message,
                }
            }
            _ => Self::Database { message },
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
