//! Expense queries.
//!
//! Every statement binds its inputs as positional parameters.
//!
//! # Example
//!
//! ```no_run
//! use chrono::Local;
//! use pocketbook_core::{Amount, NewExpense};
//! use pocketbook_sqlite::{ExpenseQuery, Session};
//!
//! let session = Session::open("expenses", "expenses.db").unwrap();
//! let query = ExpenseQuery::new(&session);
//!
//! query
//!     .add(&NewExpense {
//!         amount: Amount::from_cents(1456),
//!         memo: "Pencils".into(),
//!         created_on: Local::now().date_naive(),
//!     })
//!     .unwrap();
//!
//! for expense in query.search("pencil").unwrap() {
//!     println!("{expense}");
//! }
//! ```

use pocketbook_core::{Amount, Expense, NewExpense};
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::debug;

use crate::error::{Result, SqliteError};
use crate::session::Session;

const COLUMNS: &str = "id, amount_cents, memo, created_on";

/// Query interface for the `expenses` table.
pub struct ExpenseQuery<'a> {
    conn: &'a Connection,
}

impl<'a> ExpenseQuery<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            conn: session.connection(),
        }
    }

    /// Inserts an expense and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::DatabaseError`] on a constraint violation,
    /// e.g. a non-positive amount or an empty memo.
    pub fn add(&self, expense: &NewExpense) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO expenses (amount_cents, memo, created_on) VALUES (?1, ?2, ?3)",
            params![expense.amount.cents(), expense.memo, expense.created_on],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, "expense inserted");
        Ok(id)
    }

    /// Returns every expense in storage order.
    pub fn all(&self) -> Result<Vec<Expense>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM expenses ORDER BY id"))?;
        let expenses = stmt
            .query_map([], expense_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(expenses)
    }

    /// Looks up one expense by id.
    pub fn find(&self, id: i64) -> Result<Option<Expense>> {
        let expense = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM expenses WHERE id = ?1"),
                params![id],
                expense_from_row,
            )
            .optional()?;
        Ok(expense)
    }

    /// Returns expenses whose memo contains `term`, ignoring ASCII case.
    ///
    /// `%`, `_` and `\` in the term match literally.
    pub fn search(&self, term: &str) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM expenses \
             WHERE memo LIKE '%' || ?1 || '%' ESCAPE '\\' ORDER BY id"
        ))?;
        let expenses = stmt
            .query_map(params![escape_like(term)], expense_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!(term, matches = expenses.len(), "expenses searched");
        Ok(expenses)
    }

    /// Deletes one expense and returns the deleted row.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::ExpenseNotFound`] if no row has this id.
    pub fn delete(&self, id: i64) -> Result<Expense> {
        let deleted = self
            .conn
            .query_row(
                &format!("DELETE FROM expenses WHERE id = ?1 RETURNING {COLUMNS}"),
                params![id],
                expense_from_row,
            )
            .optional()?;
        let expense = deleted.ok_or(SqliteError::ExpenseNotFound(id))?;
        debug!(id, "expense deleted");
        Ok(expense)
    }

    /// Deletes every expense and returns how many rows were removed.
    pub fn clear(&self) -> Result<usize> {
        let rows = self.conn.execute("DELETE FROM expenses", [])?;
        debug!(rows, "expenses cleared");
        Ok(rows)
    }

    /// Number of stored expenses.
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        amount: Amount::from_cents(row.get(1)?),
        memo: row.get(2)?,
        created_on: row.get(3)?,
    })
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{Database, Migration};

    fn session() -> Session {
        let session = Session::open_in_memory("expenses").unwrap();
        Migration::new(&session, Database::Expenses).up().unwrap();
        session
    }

    fn new_expense(cents: i64, memo: &str) -> NewExpense {
        NewExpense {
            amount: Amount::from_cents(cents),
            memo: memo.into(),
            created_on: NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
        }
    }

    #[test]
    fn test_add_then_all() {
        let session = session();
        let query = ExpenseQuery::new(&session);
        let id = query.add(&new_expense(1456, "Pencils")).unwrap();

        let all = query.all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
        assert_eq!(all[0].amount, Amount::from_cents(1456));
        assert_eq!(all[0].memo, "Pencils");
        assert_eq!(all[0].created_on, NaiveDate::from_ymd_opt(2024, 5, 17).unwrap());
    }

    #[test]
    fn test_add_rejects_non_positive_amount() {
        let session = session();
        let query = ExpenseQuery::new(&session);
        assert!(matches!(
            query.add(&new_expense(0, "Nothing")),
            Err(SqliteError::DatabaseError(_))
        ));
        assert_eq!(query.count().unwrap(), 0);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let session = session();
        let query = ExpenseQuery::new(&session);
        query.add(&new_expense(329, "Coffee beans")).unwrap();
        query.add(&new_expense(150, "Iced COFFEE")).unwrap();
        query.add(&new_expense(4999, "Text editor")).unwrap();

        let memos: Vec<_> = query
            .search("coffee")
            .unwrap()
            .into_iter()
            .map(|e| e.memo)
            .collect();
        assert_eq!(memos, ["Coffee beans", "Iced COFFEE"]);
    }

    #[test]
    fn test_search_treats_wildcards_literally() {
        let session = session();
        let query = ExpenseQuery::new(&session);
        query.add(&new_expense(100, "100% cotton")).unwrap();
        query.add(&new_expense(200, "1000 cotton")).unwrap();
        query.add(&new_expense(300, "snake_case")).unwrap();
        query.add(&new_expense(400, "snakeXcase")).unwrap();

        assert_eq!(query.search("0%").unwrap().len(), 1);
        assert_eq!(query.search("e_c").unwrap().len(), 1);
    }

    #[test]
    fn test_delete_returns_row_and_removes_it() {
        let session = session();
        let query = ExpenseQuery::new(&session);
        let keep = query.add(&new_expense(100, "Keep")).unwrap();
        let gone = query.add(&new_expense(200, "Drop")).unwrap();

        let deleted = query.delete(gone).unwrap();
        assert_eq!(deleted.memo, "Drop");
        assert!(query.find(gone).unwrap().is_none());
        assert!(query.find(keep).unwrap().is_some());
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let session = session();
        let err = ExpenseQuery::new(&session).delete(99).unwrap_err();
        assert!(matches!(err, SqliteError::ExpenseNotFound(99)));
        assert_eq!(err.to_string(), "There is no expense with the id '99'.");
    }

    #[test]
    fn test_clear_removes_everything() {
        let session = session();
        let query = ExpenseQuery::new(&session);
        query.add(&new_expense(100, "a")).unwrap();
        query.add(&new_expense(200, "b")).unwrap();
        assert_eq!(query.clear().unwrap(), 2);
        assert_eq!(query.count().unwrap(), 0);
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like(r"50%_off\now"), r"50\%\_off\\now");
        assert_eq!(escape_like("plain"), "plain");
    }
}
