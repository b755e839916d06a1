//! SQLite storage for the pocketbook expense and todo tools.
//!
//! # Architecture
//!
//! - **`schema`**: create/drop/seed scripts for the two independent
//!   databases
//! - **`session`**: the single connection a tool invocation uses, released
//!   on every exit path
//! - **`migration`**: lifecycle operations (up/down/seed/refresh/status)
//! - **`expense`**, **`todo`**: parameterized CRUD queries
//!
//! # Quick start
//!
//! ```no_run
//! use pocketbook_sqlite::{Database, ExpenseQuery, Migration, Session};
//!
//! let session = Session::create("expenses", "expenses.db").unwrap();
//! Migration::new(&session, Database::Expenses).up().unwrap();
//!
//! for expense in ExpenseQuery::new(&session).all().unwrap() {
//!     println!("{expense}");
//! }
//! session.close().unwrap();
//! ```

mod error;
mod expense;
mod migration;
mod schema;
mod session;
mod todo;

pub use error::{Result, SqliteError};
pub use expense::ExpenseQuery;
pub use migration::{Migration, MigrationStatus, SeedReport, TableCount};
pub use schema::{Database, generate_drop_sql, generate_schema_sql, generate_seed_sql};
pub use session::Session;
pub use todo::TodoQuery;
