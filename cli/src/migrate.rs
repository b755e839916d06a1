//! The `pocketbook-migrate` tool: schema lifecycle for either database.

use std::io::Write;

use clap::{Args, Subcommand};
use pocketbook_config::Config;
use pocketbook_sqlite::{Database, Migration, SeedReport};

use crate::error::Result;
use crate::settings::create_session;

/// CLI-specific database selector with clap argument parsing support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliDatabase {
    Expenses,
    Todos,
}

impl From<CliDatabase> for Database {
    fn from(db: CliDatabase) -> Self {
        match db {
            CliDatabase::Expenses => Self::Expenses,
            CliDatabase::Todos => Self::Todos,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct DatabaseArgs {
    /// Which database to operate on.
    #[arg(long, value_enum)]
    pub database: CliDatabase,
}

#[derive(Debug, Clone, Subcommand)]
pub enum MigrateOperation {
    /// Create the tables, creating the database file if needed.
    Up(DatabaseArgs),
    /// Drop the tables.
    Down(DatabaseArgs),
    /// Insert the sample rows.
    Seed(DatabaseArgs),
    /// Drop tables, recreate, and reseed.
    Refresh(DatabaseArgs),
    /// Show table and row-count status.
    Status(DatabaseArgs),
}

impl MigrateOperation {
    fn database(&self) -> Database {
        match self {
            Self::Up(a) | Self::Down(a) | Self::Seed(a) | Self::Refresh(a) | Self::Status(a) => {
                a.database.into()
            }
        }
    }
}

/// Runs one migration operation and writes a summary to `out`.
pub fn run<W: Write>(operation: &MigrateOperation, config: &Config, out: &mut W) -> Result<()> {
    let database = operation.database();
    let session = create_session(config, database)?;
    let migration = Migration::new(&session, database);
    let name = session.database().to_string();

    match operation {
        MigrateOperation::Up(_) => {
            migration.up()?;
            writeln!(out, "Migration up complete. Tables created in '{name}'.")?;
        }
        MigrateOperation::Down(_) => {
            migration.down()?;
            writeln!(out, "Migration down complete. Tables dropped from '{name}'.")?;
        }
        MigrateOperation::Seed(_) => {
            let report = migration.seed()?;
            writeln!(out, "Seed complete:")?;
            write_report(out, &report)?;
        }
        MigrateOperation::Refresh(_) => {
            let report = migration.refresh()?;
            writeln!(out, "Refresh complete (tables dropped, recreated, and reseeded):")?;
            write_report(out, &report)?;
        }
        MigrateOperation::Status(_) => {
            let status = migration.status()?;
            writeln!(out, "Migration Status:")?;
            writeln!(
                out,
                "  Tables exist: {}",
                if status.tables_exist { "yes" } else { "no" }
            )?;
            for count in &status.row_counts {
                writeln!(out, "  {} rows: {}", count.table, count.rows)?;
            }
        }
    }

    session.close()?;
    Ok(())
}

fn write_report<W: Write>(out: &mut W, report: &SeedReport) -> Result<()> {
    for count in &report.rows_inserted {
        writeln!(out, "  {} inserted: {}", count.table, count.rows)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todos() -> DatabaseArgs {
        DatabaseArgs {
            database: CliDatabase::Todos,
        }
    }

    fn run_to_string(operation: MigrateOperation, config: &Config) -> String {
        let mut out = Vec::new();
        run(&operation, config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_cli_database_maps_to_database() {
        assert_eq!(Database::from(CliDatabase::Expenses), Database::Expenses);
        assert_eq!(Database::from(CliDatabase::Todos), Database::Todos);
    }

    #[test]
    fn test_lifecycle_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default().with_data_dir(dir.path());

        let out = run_to_string(MigrateOperation::Status(todos()), &config);
        assert_eq!(out, "Migration Status:\n  Tables exist: no\n");

        let out = run_to_string(MigrateOperation::Up(todos()), &config);
        assert_eq!(out, "Migration up complete. Tables created in 'todos'.\n");
        assert!(dir.path().join("todos.db").exists());

        let out = run_to_string(MigrateOperation::Seed(todos()), &config);
        assert_eq!(out, "Seed complete:\n  lists inserted: 2\n  todos inserted: 4\n");

        let out = run_to_string(MigrateOperation::Refresh(todos()), &config);
        assert!(out.ends_with("  lists inserted: 2\n  todos inserted: 4\n"));

        let out = run_to_string(MigrateOperation::Status(todos()), &config);
        assert_eq!(
            out,
            "Migration Status:\n  Tables exist: yes\n  lists rows: 2\n  todos rows: 4\n"
        );

        let out = run_to_string(MigrateOperation::Down(todos()), &config);
        assert_eq!(out, "Migration down complete. Tables dropped from 'todos'.\n");
    }

    #[test]
    fn test_seed_without_tables_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default().with_data_dir(dir.path());
        let mut out = Vec::new();
        let seed = MigrateOperation::Seed(DatabaseArgs {
            database: CliDatabase::Expenses,
        });
        assert!(run(&seed, &config, &mut out).is_err());
    }
}
