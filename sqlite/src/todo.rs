//! Todo list queries.
//!
//! Lists and todos live in the `todos` database. Referential integrity and
//! title uniqueness are enforced by the schema; lookups that find nothing
//! surface as [`SqliteError::ListNotFound`] or [`SqliteError::TodoNotFound`].

use pocketbook_core::{Todo, TodoList, sort_items};
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::debug;

use crate::error::{Result, SqliteError};
use crate::session::Session;

const LIST_SELECT: &str = "
SELECT l.id, l.title,
       COUNT(t.id) AS todo_count,
       COALESCE(SUM(CASE WHEN t.id IS NOT NULL AND t.is_completed = 0 THEN 1 ELSE 0 END), 0)
           AS todos_remaining
FROM lists l
LEFT JOIN todos t ON t.list_id = l.id";

/// Query interface for the `lists` and `todos` tables.
///
/// # Examples
///
/// ```no_run
/// use pocketbook_sqlite::{Session, TodoQuery};
///
/// let session = Session::open("todos", "todos.db").unwrap();
/// let query = TodoQuery::new(&session);
///
/// let list_id = query.create_list("Groceries").unwrap();
/// query.create_todo(list_id, "Milk").unwrap();
///
/// for list in query.all_lists().unwrap() {
///     println!("{list}");
/// }
/// ```
pub struct TodoQuery<'a> {
    conn: &'a Connection,
}

impl<'a> TodoQuery<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            conn: session.connection(),
        }
    }

    /// Returns every list with its counts, incomplete lists first, each
    /// group ordered by title ignoring case.
    pub fn all_lists(&self) -> Result<Vec<TodoList>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{LIST_SELECT} GROUP BY l.id ORDER BY l.id"))?;
        let mut lists = stmt
            .query_map([], list_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        sort_items(&mut lists);
        Ok(lists)
    }

    /// Looks up one list by id.
    pub fn find_list(&self, list_id: i64) -> Result<Option<TodoList>> {
        let list = self
            .conn
            .query_row(
                &format!("{LIST_SELECT} WHERE l.id = ?1 GROUP BY l.id"),
                params![list_id],
                list_from_row,
            )
            .optional()?;
        Ok(list)
    }

    /// Like [`find_list`](Self::find_list), but a missing list is an error.
    pub fn require_list(&self, list_id: i64) -> Result<TodoList> {
        self.find_list(list_id)?
            .ok_or(SqliteError::ListNotFound(list_id))
    }

    /// Creates a list and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::DatabaseError`] if the title is already taken.
    pub fn create_list(&self, title: &str) -> Result<i64> {
        self.conn
            .execute("INSERT INTO lists (title) VALUES (?1)", params![title])?;
        let id = self.conn.last_insert_rowid();
        debug!(id, title, "list created");
        Ok(id)
    }

    /// Renames a list.
    pub fn update_list(&self, list_id: i64, title: &str) -> Result<()> {
        let rows = self.conn.execute(
            "UPDATE lists SET title = ?1 WHERE id = ?2",
            params![title, list_id],
        )?;
        if rows == 0 {
            return Err(SqliteError::ListNotFound(list_id));
        }
        debug!(list_id, title, "list renamed");
        Ok(())
    }

    /// Deletes a list, and through the cascade all of its todos. Returns
    /// the deleted list's title.
    pub fn delete_list(&self, list_id: i64) -> Result<String> {
        let title: Option<String> = self
            .conn
            .query_row(
                "DELETE FROM lists WHERE id = ?1 RETURNING title",
                params![list_id],
                |row| row.get(0),
            )
            .optional()?;
        let title = title.ok_or(SqliteError::ListNotFound(list_id))?;
        debug!(list_id, "list deleted");
        Ok(title)
    }

    /// Returns the todos of a list, incomplete first, then by title.
    pub fn todos(&self, list_id: i64) -> Result<Vec<Todo>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, list_id, title, is_completed FROM todos WHERE list_id = ?1 ORDER BY id",
        )?;
        let mut todos = stmt
            .query_map(params![list_id], todo_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        sort_items(&mut todos);
        Ok(todos)
    }

    /// Adds a todo to a list and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::DatabaseError`] (a foreign key violation) if
    /// the list does not exist.
    pub fn create_todo(&self, list_id: i64, title: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO todos (title, list_id) VALUES (?1, ?2)",
            params![title, list_id],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, list_id, "todo created");
        Ok(id)
    }

    /// Sets the completion state of one todo in a list.
    pub fn set_todo_completed(&self, list_id: i64, todo_id: i64, completed: bool) -> Result<()> {
        let rows = self.conn.execute(
            "UPDATE todos SET is_completed = ?1 WHERE id = ?2 AND list_id = ?3",
            params![completed, todo_id, list_id],
        )?;
        if rows == 0 {
            return Err(SqliteError::TodoNotFound { list_id, todo_id });
        }
        debug!(list_id, todo_id, completed, "todo updated");
        Ok(())
    }

    /// Deletes one todo from a list.
    pub fn delete_todo(&self, list_id: i64, todo_id: i64) -> Result<()> {
        let rows = self.conn.execute(
            "DELETE FROM todos WHERE id = ?1 AND list_id = ?2",
            params![todo_id, list_id],
        )?;
        if rows == 0 {
            return Err(SqliteError::TodoNotFound { list_id, todo_id });
        }
        debug!(list_id, todo_id, "todo deleted");
        Ok(())
    }

    /// Marks every todo in a list completed; returns how many changed.
    pub fn complete_all(&self, list_id: i64) -> Result<usize> {
        let rows = self.conn.execute(
            "UPDATE todos SET is_completed = 1 WHERE list_id = ?1 AND is_completed = 0",
            params![list_id],
        )?;
        debug!(list_id, rows, "todos completed");
        Ok(rows)
    }
}

fn list_from_row(row: &Row<'_>) -> rusqlite::Result<TodoList> {
    Ok(TodoList {
        id: row.get(0)?,
        title: row.get(1)?,
        todo_count: row.get::<_, i64>(2)? as usize,
        todos_remaining: row.get::<_, i64>(3)? as usize,
    })
}

fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        list_id: row.get(1)?,
        title: row.get(2)?,
        is_completed: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, Migration};

    fn session() -> Session {
        let session = Session::open_in_memory("todos").unwrap();
        Migration::new(&session, Database::Todos).up().unwrap();
        session
    }

    #[test]
    fn test_list_counts() {
        let session = session();
        let query = TodoQuery::new(&session);
        let list_id = query.create_list("Groceries").unwrap();
        let milk = query.create_todo(list_id, "Milk").unwrap();
        query.create_todo(list_id, "Bread").unwrap();
        query.set_todo_completed(list_id, milk, true).unwrap();

        let list = query.require_list(list_id).unwrap();
        assert_eq!(list.todo_count, 2);
        assert_eq!(list.todos_remaining, 1);
        assert!(!list.is_completed());
    }

    #[test]
    fn test_empty_list_has_zero_counts() {
        let session = session();
        let query = TodoQuery::new(&session);
        let list_id = query.create_list("Empty").unwrap();
        let list = query.require_list(list_id).unwrap();
        assert_eq!((list.todo_count, list.todos_remaining), (0, 0));
    }

    #[test]
    fn test_all_lists_sorted_incomplete_first() {
        let session = session();
        let query = TodoQuery::new(&session);
        let done = query.create_list("Archive").unwrap();
        let todo = query.create_todo(done, "Old task").unwrap();
        query.set_todo_completed(done, todo, true).unwrap();
        query.create_list("zebra").unwrap();
        query.create_list("Banana").unwrap();

        let titles: Vec<_> = query
            .all_lists()
            .unwrap()
            .into_iter()
            .map(|l| l.title)
            .collect();
        assert_eq!(titles, ["Banana", "zebra", "Archive"]);
    }

    #[test]
    fn test_duplicate_list_title_rejected() {
        let session = session();
        let query = TodoQuery::new(&session);
        query.create_list("Homework").unwrap();
        assert!(matches!(
            query.create_list("Homework"),
            Err(SqliteError::DatabaseError(_))
        ));
    }

    #[test]
    fn test_update_missing_list() {
        let session = session();
        let query = TodoQuery::new(&session);
        assert!(matches!(
            query.update_list(7, "New"),
            Err(SqliteError::ListNotFound(7))
        ));
    }

    #[test]
    fn test_delete_list_cascades() {
        let session = session();
        let query = TodoQuery::new(&session);
        let list_id = query.create_list("Homework").unwrap();
        query.create_todo(list_id, "Essay").unwrap();

        assert_eq!(query.delete_list(list_id).unwrap(), "Homework");
        let remaining: i64 = session
            .connection()
            .query_row("SELECT COUNT(*) FROM todos", [], |row| row.get(0))
            .unwrap();
        assert_eq!(remaining, 0);
        assert!(matches!(
            query.delete_list(list_id),
            Err(SqliteError::ListNotFound(_))
        ));
    }

    #[test]
    fn test_todo_requires_existing_list() {
        let session = session();
        let query = TodoQuery::new(&session);
        assert!(matches!(
            query.create_todo(42, "Orphan"),
            Err(SqliteError::DatabaseError(_))
        ));
    }

    #[test]
    fn test_todo_operations_are_scoped_to_their_list() {
        let session = session();
        let query = TodoQuery::new(&session);
        let a = query.create_list("A").unwrap();
        let b = query.create_list("B").unwrap();
        let todo = query.create_todo(a, "Only in A").unwrap();

        assert!(matches!(
            query.set_todo_completed(b, todo, true),
            Err(SqliteError::TodoNotFound { .. })
        ));
        assert!(matches!(
            query.delete_todo(b, todo),
            Err(SqliteError::TodoNotFound { .. })
        ));
        query.delete_todo(a, todo).unwrap();
        assert!(query.todos(a).unwrap().is_empty());
    }

    #[test]
    fn test_complete_all() {
        let session = session();
        let query = TodoQuery::new(&session);
        let list_id = query.create_list("Chores").unwrap();
        let first = query.create_todo(list_id, "Dishes").unwrap();
        query.create_todo(list_id, "Laundry").unwrap();
        query.set_todo_completed(list_id, first, true).unwrap();

        assert_eq!(query.complete_all(list_id).unwrap(), 1);
        assert!(query.todos(list_id).unwrap().iter().all(|t| t.is_completed));
        assert!(query.require_list(list_id).unwrap().is_completed());
    }

    #[test]
    fn test_todos_sorted_incomplete_first() {
        let session = session();
        let query = TodoQuery::new(&session);
        let list_id = query.create_list("Groceries").unwrap();
        let apples = query.create_todo(list_id, "apples").unwrap();
        query.create_todo(list_id, "Milk").unwrap();
        query.create_todo(list_id, "bread").unwrap();
        query.set_todo_completed(list_id, apples, true).unwrap();

        let titles: Vec<_> = query
            .todos(list_id)
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["bread", "Milk", "apples"]);
    }
}
