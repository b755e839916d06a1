//! Display ordering for lists and todos.
//!
//! Items are ordered case-insensitively by title, with incomplete items
//! ahead of completed ones.

use crate::{Todo, TodoList};

/// Something with a title and a completion state.
pub trait Completable {
    fn title(&self) -> &str;
    fn is_completed(&self) -> bool;
}

impl Completable for TodoList {
    fn title(&self) -> &str {
        &self.title
    }

    fn is_completed(&self) -> bool {
        TodoList::is_completed(self)
    }
}

impl Completable for Todo {
    fn title(&self) -> &str {
        &self.title
    }

    fn is_completed(&self) -> bool {
        self.is_completed
    }
}

/// Sorts items in place: incomplete first, then by lowercase title.
///
/// The sort is stable, so items with equal keys keep their storage order.
///
/// # Examples
///
/// ```
/// use pocketbook_core::{Todo, sort_items};
///
/// let todo = |id, title: &str, done| Todo {
///     id,
///     list_id: 1,
///     title: title.into(),
///     is_completed: done,
/// };
/// let mut todos = vec![todo(1, "bread", true), todo(2, "Milk", false), todo(3, "apples", false)];
/// sort_items(&mut todos);
/// let ids: Vec<_> = todos.iter().map(|t| t.id).collect();
/// assert_eq!(ids, [3, 2, 1]);
/// ```
pub fn sort_items<T: Completable>(items: &mut [T]) {
    items.sort_by_cached_key(|item| (item.is_completed(), item.title().to_lowercase()));
}
