//! Command-line front ends for the pocketbook expense and todo databases.
//!
//! Three binaries share this library:
//!
//! - `expense` records, lists, searches, and deletes expenses
//! - `todo` manages todo lists and their items
//! - `pocketbook-migrate` creates, drops, and seeds either database
//!
//! Each tool validates its arguments before touching the database, opens a
//! single [`pocketbook_sqlite::Session`], runs one command, and closes it.

pub mod error;
pub mod expense;
pub mod logging;
pub mod migrate;
pub mod settings;
pub mod todo;

pub use error::{CliError, Result};
pub use settings::GlobalArgs;

/// Prints `err` to stderr and exits with status 1.
///
/// An unknown command is followed by the tool's help text.
pub fn exit_with_error(err: &CliError, help: &str) -> ! {
    eprintln!("error: {err}");
    if matches!(err, CliError::UnknownCommand(_)) {
        eprintln!();
        eprint!("{help}");
    }
    std::process::exit(1);
}
