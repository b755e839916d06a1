//! Process-scoped database sessions.
//!
//! A [`Session`] owns the single connection a tool invocation uses. Opening
//! happens in two steps: acquire the connection, then prepare it for
//! statements (enable foreign keys and read the schema header). If the
//! second step fails the connection is closed before the error is returned.
//!
//! The connection is released when the session is dropped, so every exit
//! path out of a handler (including `?` on an error) closes it. Call
//! [`Session::close`] to release it explicitly and observe close errors.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use tracing::{debug, warn};

use crate::error::{Result, SqliteError};

/// An open, configured connection to one named database.
#[derive(Debug)]
pub struct Session {
    database: String,
    conn: Connection,
}

impl Session {
    /// Opens an existing database file.
    ///
    /// Never creates the file: a missing database is a connection failure.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::ConnectError`] if the file cannot be opened,
    /// or [`SqliteError::CursorError`] if it is not a usable database.
    pub fn open(database: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::connect(database.into(), || {
            Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
        })
    }

    /// Opens a database file, creating it if it does not exist.
    ///
    /// Used by migrations, which are the only place databases come into
    /// existence.
    pub fn create(database: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::connect(database.into(), || Connection::open(path))
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory(database: impl Into<String>) -> Result<Self> {
        Self::connect(database.into(), Connection::open_in_memory)
    }

    fn connect(
        database: String,
        open: impl FnOnce() -> rusqlite::Result<Connection>,
    ) -> Result<Self> {
        let conn = match open() {
            Ok(conn) => conn,
            Err(source) => return Err(SqliteError::ConnectError { database, source }),
        };

        if let Err(source) = prepare_cursor(&conn) {
            if let Err((_, close_err)) = conn.close() {
                warn!(%database, error = %close_err, "failed to close rejected connection");
            }
            return Err(SqliteError::CursorError { database, source });
        }

        debug!(%database, "session opened");
        Ok(Self { database, conn })
    }

    /// Name of the database this session is connected to.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Closes the connection, reporting any error from SQLite.
    pub fn close(self) -> Result<()> {
        let Session { database, conn } = self;
        conn.close()
            .map_err(|(_, source)| SqliteError::CloseError {
                database: database.clone(),
                source,
            })?;
        debug!(%database, "session closed");
        Ok(())
    }
}

/// Enables foreign keys and touches the schema header, which fails for
/// files that are not SQLite databases.
fn prepare_cursor(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.pragma_query_value(None, "schema_version", |row| row.get::<_, i64>(0))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory_enables_foreign_keys() {
        let session = Session::open_in_memory("expenses").unwrap();
        let enabled: i64 = session
            .connection()
            .pragma_query_value(None, "foreign_keys", |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
        assert_eq!(session.database(), "expenses");
        session.close().unwrap();
    }

    #[test]
    fn test_open_missing_file_is_connect_error_naming_database() {
        let dir = tempfile::tempdir().unwrap();
        let err = Session::open("expenses", dir.path().join("expenses.db")).unwrap_err();
        assert!(matches!(err, SqliteError::ConnectError { .. }));
        assert_eq!(
            err.to_string(),
            "Unable to get a connection to: expenses. Exiting."
        );
        assert!(!dir.path().join("expenses.db").exists());
    }

    #[test]
    fn test_open_non_database_file_is_cursor_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.db");
        std::fs::write(&path, "this is not a database\n".repeat(512)).unwrap();

        let err = Session::open("todos", &path).unwrap_err();
        assert!(matches!(err, SqliteError::CursorError { .. }), "{err:?}");
    }

    #[test]
    fn test_create_then_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.db");

        Session::create("todos", &path).unwrap().close().unwrap();
        assert!(path.exists());

        let session = Session::open("todos", &path).unwrap();
        assert_eq!(session.database(), "todos");
    }
}
