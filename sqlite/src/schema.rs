//! SQL schema scripts for the two pocketbook databases.
//!
//! Each [`Database`] owns its own tables and constraints; the two schemas
//! share nothing. Create scripts use `CREATE TABLE IF NOT EXISTS` and drop
//! scripts use `DROP TABLE IF EXISTS`, so both are safe to run repeatedly.
//!
//! # Table structure
//!
//! `expenses` database:
//!
//! - `expenses`: amount in hundredths (`> 0`), non-empty memo, date
//!
//! `todos` database:
//!
//! - `lists`: uniquely titled todo lists
//! - `todos`: todos, each belonging to one list; deleting a list
//!   cascades to its todos

/// One of the two independent databases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Database {
    Expenses,
    Todos,
}

impl Database {
    /// Every database, in a stable order.
    pub const ALL: [Database; 2] = [Database::Expenses, Database::Todos];

    /// The default name, used for the file stem and in messages.
    pub fn default_name(self) -> &'static str {
        match self {
            Database::Expenses => "expenses",
            Database::Todos => "todos",
        }
    }

    /// Tables owned by this database, parents before children.
    pub fn tables(self) -> &'static [&'static str] {
        match self {
            Database::Expenses => &["expenses"],
            Database::Todos => &["lists", "todos"],
        }
    }
}

/// Generates the create script for all tables and indexes of `database`.
pub fn generate_schema_sql(database: Database) -> &'static str {
    match database {
        Database::Expenses => {
            r#"
CREATE TABLE IF NOT EXISTS expenses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    amount_cents INTEGER NOT NULL CHECK (amount_cents > 0),
    memo TEXT NOT NULL CHECK (length(memo) > 0),
    created_on TEXT NOT NULL DEFAULT (date('now', 'localtime'))
);
"#
        }
        Database::Todos => {
            r#"
CREATE TABLE IF NOT EXISTS lists (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    is_completed INTEGER NOT NULL DEFAULT 0 CHECK (is_completed IN (0, 1)),
    list_id INTEGER NOT NULL,
    FOREIGN KEY (list_id) REFERENCES lists(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_todos_list ON todos(list_id);
"#
        }
    }
}

/// Generates the drop script, children before parents.
pub fn generate_drop_sql(database: Database) -> &'static str {
    match database {
        Database::Expenses => {
            r#"
DROP TABLE IF EXISTS expenses;
"#
        }
        Database::Todos => {
            r#"
DROP TABLE IF EXISTS todos;
DROP TABLE IF EXISTS lists;
"#
        }
    }
}

/// Generates the fixed sample rows for `database`.
pub fn generate_seed_sql(database: Database) -> &'static str {
    match database {
        Database::Expenses => {
            r#"
INSERT INTO expenses (amount_cents, memo) VALUES
    (1456, 'Pencils'),
    (329, 'Coffee'),
    (4999, 'Text Editor');
"#
        }
        Database::Todos => {
            r#"
INSERT INTO lists (title) VALUES ('Homework'), ('Groceries');

INSERT INTO todos (title, is_completed, list_id) VALUES
    ('Read chapter 3', 0, (SELECT id FROM lists WHERE title = 'Homework')),
    ('Write essay', 1, (SELECT id FROM lists WHERE title = 'Homework')),
    ('Milk', 0, (SELECT id FROM lists WHERE title = 'Groceries')),
    ('Bread', 0, (SELECT id FROM lists WHERE title = 'Groceries'));
"#
        }
    }
}
