//! Migration lifecycle operations for the pocketbook schemas.
//!
//! Provides [`Migration`] for creating, dropping, seeding, and refreshing
//! the tables of one [`Database`]. Every mutation runs in a transaction, so
//! either the whole script applies or nothing does.
//!
//! # Example
//!
//! ```no_run
//! use pocketbook_sqlite::{Database, Migration, Session};
//!
//! let session = Session::create("expenses", "expenses.db").unwrap();
//! let migration = Migration::new(&session, Database::Expenses);
//!
//! migration.up().unwrap();
//! migration.seed().unwrap();
//!
//! let status = migration.status().unwrap();
//! assert!(status.tables_exist);
//! ```

use tracing::info;

use crate::error::{Result, SqliteError};
use crate::schema::{Database, generate_drop_sql, generate_schema_sql, generate_seed_sql};
use crate::session::Session;

/// Manages the lifecycle of one database's tables.
pub struct Migration<'a> {
    session: &'a Session,
    database: Database,
}

impl<'a> Migration<'a> {
    /// Creates a migration manager for `database` over an open session.
    pub fn new(session: &'a Session, database: Database) -> Self {
        Self { session, database }
    }

    /// Creates all tables and indexes. Safe to call repeatedly.
    pub fn up(&self) -> Result<()> {
        self.run_script(generate_schema_sql(self.database), "create tables")?;
        info!(database = self.session.database(), "tables created");
        Ok(())
    }

    /// Drops all tables. Safe to call when they do not exist.
    pub fn down(&self) -> Result<()> {
        self.run_script(generate_drop_sql(self.database), "drop tables")?;
        info!(database = self.session.database(), "tables dropped");
        Ok(())
    }

    /// Inserts the fixed sample rows.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::MigrationError`] if the tables do not exist or
    /// the sample rows conflict with existing data (duplicate list titles).
    pub fn seed(&self) -> Result<SeedReport> {
        if !self.tables_exist()? {
            return Err(SqliteError::MigrationError(format!(
                "tables for {} do not exist; run `up` first",
                self.session.database()
            )));
        }

        let before = self.row_counts()?;
        self.run_script(generate_seed_sql(self.database), "seed")?;
        let after = self.row_counts()?;

        let rows_inserted = after
            .into_iter()
            .zip(before)
            .map(|(after, before)| TableCount {
                table: after.table,
                rows: after.rows - before.rows,
            })
            .collect();

        info!(database = self.session.database(), "sample rows inserted");
        Ok(SeedReport { rows_inserted })
    }

    /// Drops, recreates, and seeds the tables in one transaction. If any
    /// step fails the existing tables and rows are left untouched.
    pub fn refresh(&self) -> Result<SeedReport> {
        let script = [
            generate_drop_sql(self.database),
            generate_schema_sql(self.database),
            generate_seed_sql(self.database),
        ]
        .concat();
        self.run_script(&script, "refresh tables")?;
        info!(database = self.session.database(), "tables refreshed");

        // The tables are new, so every row present was inserted by the seed.
        Ok(SeedReport {
            rows_inserted: self.row_counts()?,
        })
    }

    /// Returns whether the tables exist and how many rows each holds.
    pub fn status(&self) -> Result<MigrationStatus> {
        if !self.tables_exist()? {
            return Ok(MigrationStatus {
                tables_exist: false,
                row_counts: Vec::new(),
            });
        }

        Ok(MigrationStatus {
            tables_exist: true,
            row_counts: self.row_counts()?,
        })
    }

    fn run_script(&self, sql: &str, what: &str) -> Result<()> {
        let tx = self.session.connection().unchecked_transaction()?;
        tx.execute_batch(sql)
            .map_err(|e| SqliteError::MigrationError(format!("failed to {what}: {e}")))?;
        tx.commit()?;
        Ok(())
    }

    /// Checks that every table of the database exists.
    fn tables_exist(&self) -> Result<bool> {
        let mut stmt = self
            .session
            .connection()
            .prepare("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
        for table in self.database.tables() {
            let count: i64 = stmt.query_row([table], |row| row.get(0))?;
            if count == 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn row_counts(&self) -> Result<Vec<TableCount>> {
        self.database
            .tables()
            .iter()
            .map(|&table| {
                let rows: i64 = self.session.connection().query_row(
                    &format!("SELECT COUNT(*) FROM {table}"),
                    [],
                    |row| row.get(0),
                )?;
                Ok(TableCount {
                    table,
                    rows: rows as usize,
                })
            })
            .collect()
    }
}

/// Row count of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCount {
    pub table: &'static str,
    pub rows: usize,
}

/// Snapshot returned by [`Migration::status`].
#[derive(Debug, Clone)]
pub struct MigrationStatus {
    /// Whether every table of the database exists.
    pub tables_exist: bool,
    /// Rows per table; empty when the tables do not exist.
    pub row_counts: Vec<TableCount>,
}

/// Rows inserted per table by [`Migration::seed`].
#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    pub rows_inserted: Vec<TableCount>,
}
