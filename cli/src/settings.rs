//! Options shared by every binary and the session they resolve to.

use std::path::PathBuf;

use clap::{ArgAction, Args};
use pocketbook_config::Config;
use pocketbook_sqlite::{Database, Session};
use tracing::debug;

use crate::error::Result;

/// Global options: where the config and databases live, and log verbosity.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// YAML config file.
    #[arg(long, env = "POCKETBOOK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the database files; overrides the config file.
    #[arg(long, env = "POCKETBOOK_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl GlobalArgs {
    /// Loads the config file (if any) and applies the data directory
    /// override.
    pub fn load_config(&self) -> Result<Config> {
        let config = Config::load_or_default(self.config.as_deref())?;
        Ok(match &self.data_dir {
            Some(dir) => config.with_data_dir(dir),
            None => config,
        })
    }

    /// Loads the config and installs the log subscriber.
    pub fn init(&self) -> Result<Config> {
        let config = self.load_config()?;
        crate::logging::init(self.verbose, &config.logging.level);
        Ok(config)
    }
}

/// Configured name of `database`.
pub fn database_name(config: &Config, database: Database) -> &str {
    match database {
        Database::Expenses => &config.databases.expenses,
        Database::Todos => &config.databases.todos,
    }
}

/// Opens an existing database for a tool invocation.
pub fn open_session(config: &Config, database: Database) -> Result<Session> {
    let name = database_name(config, database);
    let path = config.database_path(name)?;
    debug!(database = name, path = %path.display(), "opening session");
    Ok(Session::open(name, &path)?)
}

/// Opens a database for migration, creating the file if needed.
pub fn create_session(config: &Config, database: Database) -> Result<Session> {
    let name = database_name(config, database);
    let path = config.database_path(name)?;
    debug!(database = name, path = %path.display(), "opening session for migration");
    Ok(Session::create(name, &path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_overrides_default() {
        let args = GlobalArgs {
            data_dir: Some(PathBuf::from("/tmp/books")),
            ..GlobalArgs::default()
        };
        let config = args.load_config().unwrap();
        assert_eq!(
            config.expenses_path().unwrap(),
            PathBuf::from("/tmp/books/expenses.db")
        );
    }

    #[test]
    fn test_database_name_follows_config() {
        let mut config = Config::default();
        config.databases.todos = "chores".into();
        assert_eq!(database_name(&config, Database::Todos), "chores");
        assert_eq!(database_name(&config, Database::Expenses), "expenses");
    }

    #[test]
    fn test_open_session_missing_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default().with_data_dir(dir.path());
        let err = open_session(&config, Database::Expenses).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to get a connection to: expenses. Exiting."
        );
    }
}
