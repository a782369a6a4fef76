//! Error types for the MySQL loader.

use thiserror::Error;

/// Errors that can occur while loading into MySQL.
#[derive(Error, Debug)]
pub enum MySQLPopulatorError {
    /// MySQL connection or query error.
    #[error("MySQL error: {0}")]
    MySQL(#[from] mysql_async::Error),

    /// Malformed connection string.
    #[error("Invalid connection string: {0}")]
    Url(#[from] mysql_async::UrlError),

    /// A value read back from the store had an unexpected type.
    #[error("Unexpected value in {table}.{column}: {value}")]
    UnexpectedValue {
        table: &'static str,
        column: &'static str,
        value: String,
    },

    /// A transient file path cannot be embedded in a statement.
    #[error("Unsupported file path: {0}")]
    Path(String),
}
