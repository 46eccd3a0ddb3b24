//! Todo List Utilities
//!
//! Pure helpers behind the private list and its cache patches.

use crate::models::{Filter, PrivateTodo, TodoId, TodoPatch};

/// Todos passing `filter`, in their original order
pub fn filter_todos(todos: &[PrivateTodo], filter: Filter) -> Vec<PrivateTodo> {
    todos.iter().filter(|t| filter.matches(t)).cloned().collect()
}

/// Number of todos still to do
pub fn active_count(todos: &[PrivateTodo]) -> usize {
    todos.iter().filter(|t| !t.is_completed).count()
}

/// Merge a mutation's returned row into the matching entry
pub fn apply_patch(todos: &mut [PrivateTodo], patch: &TodoPatch) -> bool {
    match todos.iter_mut().find(|t| t.id == patch.id) {
        Some(todo) => {
            todo.merge(patch);
            true
        }
        None => false,
    }
}

/// Flip completion of one entry (optimistic toggle)
pub fn set_completed(todos: &mut [PrivateTodo], id: TodoId, is_completed: bool) {
    if let Some(todo) = todos.iter_mut().find(|t| t.id == id) {
        todo.is_completed = is_completed;
    }
}

pub fn remove_todo(todos: &mut Vec<PrivateTodo>, id: TodoId) {
    todos.retain(|t| t.id != id);
}

pub fn remove_completed(todos: &mut Vec<PrivateTodo>) {
    todos.retain(|t| !t.is_completed);
}

/// Insert a freshly created todo at the front (list is newest first)
pub fn prepend_todo(todos: &mut Vec<PrivateTodo>, todo: PrivateTodo) {
    if todos.iter().all(|t| t.id != todo.id) {
        todos.insert(0, todo);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::HashSet;

    fn make_todo(id: TodoId, is_completed: bool) -> PrivateTodo {
        PrivateTodo {
            id,
            title: format!("Todo {}", id),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, id as u32 % 60).unwrap(),
            is_completed,
        }
    }

    fn ids(todos: &[PrivateTodo]) -> Vec<TodoId> {
        todos.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_filters_partition_all() {
        let todos: Vec<_> = (1..=9).map(|id| make_todo(id, id % 3 == 0)).collect();

        let all: HashSet<_> = ids(&filter_todos(&todos, Filter::All)).into_iter().collect();
        let active: HashSet<_> = ids(&filter_todos(&todos, Filter::Active)).into_iter().collect();
        let completed: HashSet<_> = ids(&filter_todos(&todos, Filter::Completed)).into_iter().collect();

        assert!(active.is_disjoint(&completed));
        assert_eq!(&active | &completed, all);
        assert_eq!(all.len(), todos.len());
    }

    #[test]
    fn test_remove_keeps_order_of_others() {
        let mut todos = vec![make_todo(5, false), make_todo(4, true), make_todo(3, false), make_todo(2, false)];
        remove_todo(&mut todos, 4);
        assert_eq!(ids(&todos), vec![5, 3, 2]);

        // Unknown id is a no-op
        remove_todo(&mut todos, 42);
        assert_eq!(ids(&todos), vec![5, 3, 2]);
    }

    #[test]
    fn test_clear_completed_scenario() {
        let mut todos = vec![make_todo(1, false), make_todo(2, true), make_todo(3, false)];
        assert_eq!(ids(&filter_todos(&todos, Filter::Completed)), vec![2]);

        remove_completed(&mut todos);

        assert_eq!(ids(&todos), vec![1, 3]);
        assert!(filter_todos(&todos, Filter::Completed).is_empty());
        assert_eq!(active_count(&todos), 2);
    }

    #[test]
    fn test_apply_patch_merges_returned_fields() {
        let mut todos = vec![make_todo(1, false), make_todo(2, false)];
        let created_at = todos[1].created_at;
        let patch = TodoPatch { id: 2, title: "Renamed".to_string(), is_completed: true };

        assert!(apply_patch(&mut todos, &patch));
        assert_eq!(todos[1].title, "Renamed");
        assert!(todos[1].is_completed);
        assert_eq!(todos[1].created_at, created_at);
        assert!(!todos[0].is_completed);

        let missing = TodoPatch { id: 9, title: String::new(), is_completed: true };
        assert!(!apply_patch(&mut todos, &missing));
    }

    #[test]
    fn test_prepend_skips_known_id() {
        let mut todos = vec![make_todo(2, false)];
        prepend_todo(&mut todos, make_todo(3, false));
        prepend_todo(&mut todos, make_todo(3, true));
        assert_eq!(ids(&todos), vec![3, 2]);
        assert!(!todos[0].is_completed);
    }
}
