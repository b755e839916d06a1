//! YAML-backed tool configuration.
//!
//! # Example YAML
//!
//! ```yaml
//! data_dir: /var/lib/pocketbook
//! databases:
//!   expenses: expenses
//!   todos: todos
//! logging:
//!   level: info
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Log level used when neither the environment nor the config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Names of the two databases. Each resolves to `<data_dir>/<name>.db`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseNames {
    pub expenses: String,
    pub todos: String,
}

impl Default for DatabaseNames {
    fn default() -> Self {
        Self {
            expenses: "expenses".into(),
            todos: "todos".into(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive, e.g. `"info"` or `"pocketbook_sqlite=debug"`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.into(),
        }
    }
}

/// Top-level configuration.
///
/// # Examples
///
/// ```
/// use pocketbook_config::Config;
///
/// let config: Config = serde_yaml::from_str("data_dir: /tmp/books").unwrap();
/// assert_eq!(config.databases.expenses, "expenses");
/// assert_eq!(
///     config.todos_path().unwrap(),
///     std::path::Path::new("/tmp/books/todos.db")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the database files.
    pub data_dir: PathBuf,
    pub databases: DatabaseNames,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            databases: DatabaseNames::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the file cannot be read, or
    /// [`ConfigError::YamlError`] if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        serde_yaml::from_reader(reader).map_err(|source| ConfigError::YamlError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the file at `path` if one is given, otherwise returns defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Replaces the data directory.
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Resolves a database name to its file path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDatabaseName`] if the name is empty or
    /// contains anything other than alphanumerics, `_` and `-`.
    pub fn database_path(&self, name: &str) -> Result<PathBuf> {
        validate_database_name(name)?;
        Ok(self.data_dir.join(format!("{name}.db")))
    }

    /// Path of the expenses database.
    pub fn expenses_path(&self) -> Result<PathBuf> {
        self.database_path(&self.databases.expenses)
    }

    /// Path of the todos database.
    pub fn todos_path(&self) -> Result<PathBuf> {
        self.database_path(&self.databases.todos)
    }
}

fn validate_database_name(name: &str) -> Result<()> {
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ConfigError::InvalidDatabaseName(name.to_string()));
    }
    Ok(())
}
