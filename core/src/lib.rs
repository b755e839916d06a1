//! Core domain types for the pocketbook expense and todo tools.
//!
//! This crate holds everything that does not need a database:
//!
//! - [`Amount`]: fixed-point money with two fraction digits.
//! - [`Expense`], [`NewExpense`]: expense rows and their `|`-delimited
//!   display format.
//! - [`TodoList`], [`Todo`]: todo rows, with list completion derived from
//!   aggregate counts.
//! - [`ValidationError`] and the title/id checks that run before any
//!   session is opened.
//! - [`sort_items`]: incomplete-first, case-insensitive display ordering.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use pocketbook_core::*;
//!
//! let amount: Amount = "14.56".parse().unwrap();
//! let expense = Expense {
//!     id: 1,
//!     amount,
//!     memo: "Pencils".into(),
//!     created_on: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//! };
//! assert!(expense.to_string().ends_with("14.56 | Pencils"));
//! ```

mod amount;
mod sort;
mod types;
mod validate;

pub use amount::Amount;
pub use sort::{Completable, sort_items};
pub use types::*;
pub use validate::{
    TITLE_MAX_CHARS, TITLE_MIN_CHARS, ValidationError, error_for_list_title,
    error_for_todo_title, parse_id,
};
