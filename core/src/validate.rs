//! Argument and title validation.
//!
//! Every check here runs before a database session is opened, so a rejected
//! command never touches storage. The database still enforces its own
//! constraints; these checks only produce friendlier messages first.
//!
//! # Examples
//!
//! ```
//! use pocketbook_core::*;
//!
//! assert!(error_for_todo_title("Buy milk").is_none());
//! assert_eq!(
//!     error_for_todo_title(""),
//!     Some(ValidationError::TitleLength)
//! );
//!
//! let existing = ["Groceries"];
//! assert_eq!(
//!     error_for_list_title("Groceries", existing),
//!     Some(ValidationError::DuplicateTitle)
//! );
//! ```

use thiserror::Error;

/// Inclusive bounds on a list or todo title, in characters.
pub const TITLE_MIN_CHARS: usize = 1;
pub const TITLE_MAX_CHARS: usize = 100;

/// Input validation errors.
///
/// The `Display` impl is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `add` was given fewer than two arguments.
    #[error("You must provide an amount and memo")]
    MissingAmountOrMemo,
    /// Amount did not parse as a finite decimal number.
    #[error("The amount must be a number")]
    InvalidAmount(String),
    /// Amount parsed but cannot be represented.
    #[error("The amount '{0}' is too large")]
    AmountOutOfRange(String),
    /// `search` was given no (or only blank) terms.
    #[error("You must provide a search term")]
    MissingSearchTerm,
    /// A required positional argument is absent; holds what was expected.
    #[error("You must provide {0}")]
    MissingArgument(&'static str),
    /// An id argument is not an integer.
    #[error("'{0}' is not a valid id")]
    InvalidId(String),
    /// Title is empty or longer than [`TITLE_MAX_CHARS`].
    #[error("Title must be between 1 and 100 characters.")]
    TitleLength,
    /// Another list already uses this title.
    #[error("Title must be unique.")]
    DuplicateTitle,
}

/// Parses a row id argument.
///
/// `what` names the argument for the missing-argument message
/// (e.g. `"an expense id"`).
pub fn parse_id(raw: Option<&str>, what: &'static str) -> Result<i64, ValidationError> {
    let raw = raw.ok_or(ValidationError::MissingArgument(what))?;
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::InvalidId(raw.to_string()))
}

/// Checks a todo title.
///
/// Returns `None` when the (already trimmed) title is acceptable.
pub fn error_for_todo_title(title: &str) -> Option<ValidationError> {
    let len = title.chars().count();
    if (TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&len) {
        None
    } else {
        Some(ValidationError::TitleLength)
    }
}

/// Checks a list title against the titles of existing lists.
///
/// Uniqueness is checked before length, matching the order users see
/// messages in.
pub fn error_for_list_title<I, S>(title: &str, existing: I) -> Option<ValidationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if existing.into_iter().any(|t| t.as_ref() == title) {
        return Some(ValidationError::DuplicateTitle);
    }
    error_for_todo_title(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id(Some("42"), "an id"), Ok(42));
        assert_eq!(parse_id(Some(" 7 "), "an id"), Ok(7));
        assert_eq!(
            parse_id(None, "an expense id"),
            Err(ValidationError::MissingArgument("an expense id"))
        );
        assert_eq!(
            parse_id(Some("seven"), "an id"),
            Err(ValidationError::InvalidId("seven".into()))
        );
    }

    #[test]
    fn test_todo_title_bounds() {
        assert!(error_for_todo_title("a").is_none());
        assert!(error_for_todo_title(&"x".repeat(100)).is_none());
        assert_eq!(
            error_for_todo_title(&"x".repeat(101)),
            Some(ValidationError::TitleLength)
        );
        assert_eq!(error_for_todo_title(""), Some(ValidationError::TitleLength));
    }

    #[test]
    fn test_title_length_counts_chars_not_bytes() {
        assert!(error_for_todo_title(&"é".repeat(100)).is_none());
    }

    #[test]
    fn test_list_title_duplicate_checked_first() {
        let existing = vec!["Homework".to_string(), "Groceries".to_string()];
        assert_eq!(
            error_for_list_title("Homework", &existing),
            Some(ValidationError::DuplicateTitle)
        );
        assert!(error_for_list_title("Chores", &existing).is_none());
        assert_eq!(
            error_for_list_title("", &existing),
            Some(ValidationError::TitleLength)
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::MissingAmountOrMemo.to_string(),
            "You must provide an amount and memo"
        );
        assert_eq!(
            ValidationError::InvalidAmount("x".into()).to_string(),
            "The amount must be a number"
        );
    }
}
