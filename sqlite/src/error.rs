//! Error types for SQLite operations.
//!
//! One variant per failure category: acquiring the connection, preparing
//! it for use, executing statements, and the lookups that find no row.

use thiserror::Error;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum SqliteError {
    /// The database file could not be opened.
    #[error("Unable to get a connection to: {database}. Exiting.")]
    ConnectError {
        database: String,
        #[source]
        source: rusqlite::Error,
    },

    /// The connection opened but could not be configured for statements.
    #[error("unable to prepare a cursor for {database}: {source}")]
    CursorError {
        database: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Statement execution failure (constraint violation, type mismatch,
    /// malformed query, lost connection).
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    /// Closing the connection reported an error.
    #[error("failed to close connection to {database}: {source}")]
    CloseError {
        database: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Migration lifecycle operation failure.
    #[error("migration error: {0}")]
    MigrationError(String),

    /// No expense row has the given id.
    #[error("There is no expense with the id '{0}'.")]
    ExpenseNotFound(i64),

    /// No list row has the given id.
    #[error("List not found")]
    ListNotFound(i64),

    /// The list has no todo with the given id.
    #[error("Todo not found")]
    TodoNotFound { list_id: i64, todo_id: i64 },
}

/// Convenience alias for results with [`SqliteError`].
pub type Result<T> = std::result::Result<T, SqliteError>;
