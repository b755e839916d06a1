//! Error type for the command-line tools.
//!
//! Every category is terminal: the binaries print the message prefixed with
//! `error:` and exit with status 1.

use pocketbook_config::ConfigError;
use pocketbook_core::ValidationError;
use pocketbook_sqlite::SqliteError;
use thiserror::Error;

/// Errors surfaced by a tool invocation.
#[derive(Debug, Error)]
pub enum CliError {
    /// Missing or malformed command arguments.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The config file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Connection, cursor, or statement failure.
    #[error(transparent)]
    Store(#[from] SqliteError),

    /// The command name matched no handler.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// Reading the terminal or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results with [`CliError`].
pub type Result<T> = std::result::Result<T, CliError>;
