//! Configuration for the pocketbook tools.
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! explicit overrides supplied by the caller (command-line flags or
//! environment variables resolved by the CLI).
//!
//! # Quick start
//!
//! ```no_run
//! use pocketbook_config::Config;
//!
//! let config = Config::load_or_default(Some("pocketbook.yml".as_ref()))
//!     .unwrap()
//!     .with_data_dir("/var/lib/pocketbook");
//! let path = config.expenses_path().unwrap();
//! assert_eq!(path, std::path::Path::new("/var/lib/pocketbook/expenses.db"));
//! ```

mod config;
mod error;

pub use config::{Config, DEFAULT_LOG_LEVEL, DatabaseNames, LoggingConfig};
pub use error::{ConfigError, Result};
