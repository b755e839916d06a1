//! The `todo` tool: command dispatch and handlers.

use std::io::Write;

use pocketbook_core::{ValidationError, error_for_list_title, error_for_todo_title, parse_id};
use pocketbook_sqlite::{Session, TodoQuery};

use crate::error::{CliError, Result};

/// Help text printed when no command is given.
pub const HELP: &str = "\
A todo list manager

Commands:

lists - show all lists
new-list TITLE - create a list
rename-list LIST_ID TITLE - rename a list
delete-list LIST_ID - delete a list and all of its todos
show LIST_ID - show the todos in a list
add LIST_ID TITLE - add a todo to a list
check LIST_ID TODO_ID - mark a todo completed
uncheck LIST_ID TODO_ID - mark a todo not completed
delete LIST_ID TODO_ID - delete a todo
complete-all LIST_ID - mark every todo in a list completed
";

/// Names the dispatcher recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoCommand {
    Lists,
    NewList,
    RenameList,
    DeleteList,
    Show,
    Add,
    Check,
    Uncheck,
    Delete,
    CompleteAll,
}

impl TodoCommand {
    /// Maps a command name to a command, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "lists" => Some(Self::Lists),
            "new-list" => Some(Self::NewList),
            "rename-list" => Some(Self::RenameList),
            "delete-list" => Some(Self::DeleteList),
            "show" => Some(Self::Show),
            "add" => Some(Self::Add),
            "check" => Some(Self::Check),
            "uncheck" => Some(Self::Uncheck),
            "delete" => Some(Self::Delete),
            "complete-all" => Some(Self::CompleteAll),
            _ => None,
        }
    }
}

/// A validated command with its arguments.
///
/// Titles are trimmed and length-checked here; uniqueness needs the
/// database and is checked in [`execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoRequest {
    Lists,
    NewList { title: String },
    RenameList { list_id: i64, title: String },
    DeleteList { list_id: i64 },
    Show { list_id: i64 },
    Add { list_id: i64, title: String },
    SetCompleted { list_id: i64, todo_id: i64, completed: bool },
    Delete { list_id: i64, todo_id: i64 },
    CompleteAll { list_id: i64 },
}

impl TodoRequest {
    /// Parses a command name and its positional arguments.
    pub fn parse(name: &str, args: &[String]) -> Result<Self> {
        let command =
            TodoCommand::from_name(name).ok_or_else(|| CliError::UnknownCommand(name.to_string()))?;

        let arg = |index: usize| args.get(index).map(String::as_str);
        let list_id = || parse_id(arg(0), "a list id");
        let todo_id = || parse_id(arg(1), "a todo id");

        let request = match command {
            TodoCommand::Lists => TodoRequest::Lists,
            TodoCommand::NewList => TodoRequest::NewList {
                title: title_from(args)?,
            },
            TodoCommand::RenameList => TodoRequest::RenameList {
                list_id: list_id()?,
                title: title_from(args.get(1..).unwrap_or_default())?,
            },
            TodoCommand::DeleteList => TodoRequest::DeleteList { list_id: list_id()? },
            TodoCommand::Show => TodoRequest::Show { list_id: list_id()? },
            TodoCommand::Add => TodoRequest::Add {
                list_id: list_id()?,
                title: title_from(args.get(1..).unwrap_or_default())?,
            },
            TodoCommand::Check | TodoCommand::Uncheck => TodoRequest::SetCompleted {
                list_id: list_id()?,
                todo_id: todo_id()?,
                completed: command == TodoCommand::Check,
            },
            TodoCommand::Delete => TodoRequest::Delete {
                list_id: list_id()?,
                todo_id: todo_id()?,
            },
            TodoCommand::CompleteAll => TodoRequest::CompleteAll { list_id: list_id()? },
        };
        Ok(request)
    }
}

/// Joins the words of a title, trims it, and checks its length.
fn title_from(words: &[String]) -> std::result::Result<String, ValidationError> {
    let title = words.join(" ").trim().to_string();
    match error_for_todo_title(&title) {
        Some(err) => Err(err),
        None => Ok(title),
    }
}

/// Runs a request against an open session.
pub fn execute<W: Write>(request: &TodoRequest, session: &Session, out: &mut W) -> Result<()> {
    let query = TodoQuery::new(session);

    match request {
        TodoRequest::Lists => {
            let lists = query.all_lists()?;
            if lists.is_empty() {
                writeln!(out, "There are no lists.")?;
            }
            for list in lists {
                writeln!(out, "{list}")?;
            }
        }
        TodoRequest::NewList { title } => {
            check_unique_title(&query, title)?;
            query.create_list(title)?;
            writeln!(out, "The list has been created.")?;
        }
        TodoRequest::RenameList { list_id, title } => {
            query.require_list(*list_id)?;
            check_unique_title(&query, title)?;
            query.update_list(*list_id, title)?;
            writeln!(out, "The list title has been updated.")?;
        }
        TodoRequest::DeleteList { list_id } => {
            let title = query.delete_list(*list_id)?;
            writeln!(out, "The list '{title}' has been deleted.")?;
        }
        TodoRequest::Show { list_id } => {
            let list = query.require_list(*list_id)?;
            writeln!(out, "{}", list.title)?;
            let todos = query.todos(list.id)?;
            if todos.is_empty() {
                writeln!(out, "There are no todos.")?;
            }
            for todo in todos {
                writeln!(out, "{todo}")?;
            }
        }
        TodoRequest::Add { list_id, title } => {
            query.require_list(*list_id)?;
            query.create_todo(*list_id, title)?;
            writeln!(out, "The todo has been created.")?;
        }
        TodoRequest::SetCompleted {
            list_id,
            todo_id,
            completed,
        } => {
            query.require_list(*list_id)?;
            query.set_todo_completed(*list_id, *todo_id, *completed)?;
            writeln!(out, "The todo has been updated.")?;
        }
        TodoRequest::Delete { list_id, todo_id } => {
            query.require_list(*list_id)?;
            query.delete_todo(*list_id, *todo_id)?;
            writeln!(out, "The todo has been deleted.")?;
        }
        TodoRequest::CompleteAll { list_id } => {
            query.require_list(*list_id)?;
            query.complete_all(*list_id)?;
            writeln!(out, "The todos have been updated.")?;
        }
    }
    Ok(())
}

fn check_unique_title(query: &TodoQuery<'_>, title: &str) -> Result<()> {
    let lists = query.all_lists()?;
    match error_for_list_title(title, lists.iter().map(|l| l.title.as_str())) {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
