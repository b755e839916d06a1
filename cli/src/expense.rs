//! The `expense` tool: command dispatch and handlers.
//!
//! Arguments are parsed into an [`ExpenseRequest`] before any session is
//! opened; [`execute`] then runs the request against an open session and
//! writes results to the given output.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use pocketbook_core::{Amount, NewExpense, ValidationError, parse_id};
use pocketbook_sqlite::{ExpenseQuery, Session};
use tracing::debug;

use crate::error::{CliError, Result};

/// Help text printed when no command is given.
pub const HELP: &str = "\
An expense recording system

Commands:

add AMOUNT MEMO - record a new expense
clear - delete all expenses
list - list all expenses
delete NUMBER - remove expense with id NUMBER
search QUERY - list expenses with a matching memo field
";

/// Names the dispatcher recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseCommand {
    Add,
    List,
    Delete,
    Search,
    Clear,
}

impl ExpenseCommand {
    /// Maps a command name to a command, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "add" => Some(Self::Add),
            "list" => Some(Self::List),
            "delete" => Some(Self::Delete),
            "search" => Some(Self::Search),
            "clear" => Some(Self::Clear),
            _ => None,
        }
    }
}

/// A validated command with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseRequest {
    Add { amount: Amount, memo: String },
    List,
    Delete { id: i64 },
    Search { term: String },
    Clear,
}

impl ExpenseRequest {
    /// Parses a command name and its positional arguments.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::UnknownCommand`] for an unrecognized name and
    /// [`CliError::Validation`] for missing or malformed arguments.
    pub fn parse(name: &str, args: &[String]) -> Result<Self> {
        let command = ExpenseCommand::from_name(name)
            .ok_or_else(|| CliError::UnknownCommand(name.to_string()))?;

        let request = match command {
            ExpenseCommand::Add => {
                let [amount, memo, ..] = args else {
                    return Err(ValidationError::MissingAmountOrMemo.into());
                };
                ExpenseRequest::Add {
                    amount: Amount::parse_decimal(amount)?,
                    memo: memo.clone(),
                }
            }
            ExpenseCommand::List => ExpenseRequest::List,
            ExpenseCommand::Delete => ExpenseRequest::Delete {
                id: parse_id(args.first().map(String::as_str), "an expense id")?,
            },
            ExpenseCommand::Search => {
                let term = args.join(" ");
                if term.trim().is_empty() {
                    return Err(ValidationError::MissingSearchTerm.into());
                }
                ExpenseRequest::Search { term }
            }
            ExpenseCommand::Clear => ExpenseRequest::Clear,
        };
        Ok(request)
    }
}

/// Runs a request against an open session.
///
/// `today` stamps new expenses; `input` answers the `clear` confirmation.
pub fn execute<W, R>(
    request: &ExpenseRequest,
    session: &Session,
    today: NaiveDate,
    out: &mut W,
    input: &mut R,
) -> Result<()>
where
    W: Write,
    R: BufRead,
{
    let query = ExpenseQuery::new(session);

    match request {
        ExpenseRequest::Add { amount, memo } => {
            query.add(&NewExpense {
                amount: *amount,
                memo: memo.clone(),
                created_on: today,
            })?;
        }
        ExpenseRequest::List => {
            for expense in query.all()? {
                writeln!(out, "{expense}")?;
            }
        }
        ExpenseRequest::Delete { id } => {
            let expense = query.delete(*id)?;
            writeln!(out, "The following expense has been deleted:")?;
            writeln!(out, "{expense}")?;
        }
        ExpenseRequest::Search { term } => {
            for expense in query.search(term)? {
                writeln!(out, "{expense}")?;
            }
        }
        ExpenseRequest::Clear => {
            write!(out, "This will remove all expenses. Are you sure? (y/n) ")?;
            out.flush()?;
            if confirmed(input)? {
                query.clear()?;
                writeln!(out, "All expenses have been deleted.")?;
            } else {
                debug!("clear declined");
                writeln!(out, "No expenses were deleted.")?;
            }
        }
    }
    Ok(())
}

/// Reads one line and accepts `y` or `yes` in any case. EOF declines.
fn confirmed<R: BufRead>(input: &mut R) -> Result<bool> {
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
