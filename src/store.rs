//! Global Application State Store
//!
//! Uses Leptos reactive_stores so views re-render when the query cache changes.
//! Every mutation's cache contract lives in one `store_*` helper, and each
//! helper does its read-modify-write inside a single store write.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::cache::{CacheError, LayerId, QueryCache, QueryKey, Settled};
use crate::graphql::operations::MyTodosData;
use crate::models::{PrivateTodo, TodoId, TodoPatch};
use crate::todos;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Query results shared by every view
    pub cache: QueryCache,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Cache identity of `getMyTodos`
pub fn my_todos_key() -> QueryKey {
    QueryKey::new("getMyTodos", &serde_json::json!({}))
}

fn log_cache_error(op: &str, result: Result<bool, CacheError>) {
    match result {
        Ok(true) => {}
        Ok(false) => tracing::debug!(op, "getMyTodos not cached yet, skipping patch"),
        Err(e) => tracing::error!(op, error = %e, "cache patch failed"),
    }
}

// ========================
// Store Helper Functions
// ========================

/// Current private list (tracked), with pending optimistic updates applied
pub fn store_my_todos(store: &AppStore) -> Option<Settled<Vec<PrivateTodo>>> {
    let key = my_todos_key();
    let cache_field = store.cache();
    let cache = cache_field.read();
    match cache.read_query::<MyTodosData>(&key) {
        Ok(read) => read.map(|settled| settled.map(|data| data.todos)),
        Err(e) => {
            tracing::error!(query = key.name(), error = %e, "unreadable cache entry");
            None
        }
    }
}

/// Store a fresh `getMyTodos` result
pub fn store_load_my_todos(store: &AppStore, todos: Vec<PrivateTodo>) {
    let result = store.cache().write().write_query(my_todos_key(), &MyTodosData { todos });
    if let Err(e) = result {
        tracing::error!(error = %e, "failed to cache getMyTodos");
    }
}

/// Show the toggled completion right away; returns the layer to settle later
pub fn store_begin_toggle(store: &AppStore, id: TodoId, is_completed: bool) -> LayerId {
    store
        .cache()
        .write()
        .push_optimistic(my_todos_key(), move |data: &mut MyTodosData| {
            todos::set_completed(&mut data.todos, id, is_completed);
        })
}

/// Mutation confirmed: drop the overlay and merge the returned row
pub fn store_settle_toggle(store: &AppStore, layer: LayerId, returned: TodoPatch) {
    let cache_field = store.cache();
    let mut cache = cache_field.write();
    cache.remove_layer(layer);
    let result = cache.update_query(&my_todos_key(), |data: &mut MyTodosData| {
        todos::apply_patch(&mut data.todos, &returned);
    });
    log_cache_error("toggleTodo", result);
}

/// Mutation failed: drop the overlay, restoring the confirmed value
pub fn store_discard_toggle(store: &AppStore, layer: LayerId) {
    store.cache().write().remove_layer(layer);
}

/// Remove one todo by id
pub fn store_remove_todo(store: &AppStore, id: TodoId) {
    let result = store
        .cache()
        .write()
        .update_query(&my_todos_key(), |data: &mut MyTodosData| todos::remove_todo(&mut data.todos, id));
    log_cache_error("delete_todos", result);
}

/// Remove every completed todo
pub fn store_clear_completed(store: &AppStore) {
    let result = store
        .cache()
        .write()
        .update_query(&my_todos_key(), |data: &mut MyTodosData| todos::remove_completed(&mut data.todos));
    log_cache_error("clearCompleted", result);
}

/// Put a newly inserted private todo at the top of the list
pub fn store_prepend_todo(store: &AppStore, todo: PrivateTodo) {
    let result = store
        .cache()
        .write()
        .update_query(&my_todos_key(), |data: &mut MyTodosData| todos::prepend_todo(&mut data.todos, todo));
    log_cache_error("insertTodo", result);
}
