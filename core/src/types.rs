//! Row types for the expense and todo databases.
//!
//! These are transient views of query results. The database is the source of
//! truth; nothing here is cached between invocations.

use std::fmt;

use chrono::NaiveDate;

use crate::Amount;

/// One row of the `expenses` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub id: i64,
    pub amount: Amount,
    pub memo: String,
    pub created_on: NaiveDate,
}

/// Renders the row as `id | created_on | amount | memo`, with the amount
/// right-aligned in 12 columns.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use pocketbook_core::{Amount, Expense};
///
/// let expense = Expense {
///     id: 1,
///     amount: Amount::from_cents(1456),
///     memo: "Pencils".into(),
///     created_on: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
/// };
/// assert_eq!(expense.to_string(), "1 | 2024-03-01 |        14.56 | Pencils");
/// ```
impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {:>12} | {}",
            self.id, self.created_on, self.amount, self.memo
        )
    }
}

/// An expense that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub amount: Amount,
    pub memo: String,
    pub created_on: NaiveDate,
}

/// A todo list with aggregate counts over its todos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoList {
    pub id: i64,
    pub title: String,
    pub todo_count: usize,
    pub todos_remaining: usize,
}

impl TodoList {
    /// A list is completed when it has todos and none of them remain.
    pub fn is_completed(&self) -> bool {
        self.todo_count > 0 && self.todos_remaining == 0
    }
}

impl fmt::Display for TodoList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} | {} | {}/{} remaining",
            checkbox(self.is_completed()),
            self.id,
            self.title,
            self.todos_remaining,
            self.todo_count
        )
    }
}

/// One row of the `todos` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub list_id: i64,
    pub title: String,
    pub is_completed: bool,
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} | {}", checkbox(self.is_completed), self.id, self.title)
    }
}

fn checkbox(done: bool) -> &'static str {
    if done { "[x]" } else { "[ ]" }
}
