//! Frontend Models
//!
//! Data structures matching the GraphQL `todos` selections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// GraphQL `Int` id of a todo row
pub type TodoId = i32;

/// Shape shared by every todo view-model: id, title and (maybe) completion
pub trait TodoView {
    fn id(&self) -> TodoId;
    fn title(&self) -> &str;
    /// `None` when the selection that produced the row did not include it
    fn completed(&self) -> Option<bool>;

    /// CSS class for the title block
    fn label_class(&self) -> &'static str {
        if self.completed() == Some(true) {
            "labelContent completed"
        } else {
            "labelContent"
        }
    }
}

/// Row of the current user's private list (`getMyTodos`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateTodo {
    pub id: TodoId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub is_completed: bool,
}

/// Row returned by `toggleTodo`: a subset of [`PrivateTodo`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoPatch {
    pub id: TodoId,
    pub title: String,
    pub is_completed: bool,
}

impl PrivateTodo {
    /// Overwrite the fields carried by a mutation's returned row
    pub fn merge(&mut self, patch: &TodoPatch) {
        self.title = patch.title.clone();
        self.is_completed = patch.is_completed;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoUser {
    pub name: String,
}

/// Row of the public feed.
///
/// Older pages select `is_completed`, newer pages and the subscription select
/// `created_at`, so both are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicTodo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub is_completed: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub user: TodoUser,
}

impl TodoView for PrivateTodo {
    fn id(&self) -> TodoId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn completed(&self) -> Option<bool> {
        Some(self.is_completed)
    }
}

impl TodoView for PublicTodo {
    fn id(&self) -> TodoId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn completed(&self) -> Option<bool> {
        self.is_completed
    }
}

/// Client-side status filter of the private list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn matches(&self, todo: &PrivateTodo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.is_completed,
            Filter::Completed => todo.is_completed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }
}
