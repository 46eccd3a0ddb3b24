//! Todo Item Component
//!
//! One row of the private list: completion checkbox, title and delete button.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::graphql::operations;
use crate::models::{PrivateTodo, TodoPatch, TodoView};
use crate::store::{self, use_app_store};

/// A single private todo row
#[component]
pub fn TodoItem(index: usize, todo: PrivateTodo) -> impl IntoView {
    let ctx = use_app_context();
    let app_store = use_app_store();

    let id = todo.id();
    let is_completed = todo.is_completed;
    let label_class = todo.label_class();
    let dom_id = id.to_string();
    let title = todo.title().to_string();
    let text = title.clone();

    let toggle_todo = move |_: web_sys::Event| {
        let next = !is_completed;
        let optimistic = TodoPatch { id, title: title.clone(), is_completed: next };
        let layer = store::store_begin_toggle(&app_store, id, next);
        let client = ctx.client();
        spawn_local(async move {
            match operations::toggle_todo(&client, id, next).await {
                Ok(response) => {
                    // No returned row: keep the optimistic values
                    let returned = response.returning.into_iter().next().unwrap_or(optimistic);
                    store::store_settle_toggle(&app_store, layer, returned);
                }
                Err(e) => {
                    tracing::warn!(id, error = %e, "toggleTodo failed, rolling back");
                    store::store_discard_toggle(&app_store, layer);
                }
            }
        });
    };

    let remove_todo = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        let client = ctx.client();
        spawn_local(async move {
            match operations::delete_todo(&client, id).await {
                Ok(_) => store::store_remove_todo(&app_store, id),
                Err(e) => tracing::warn!(id, error = %e, "delete_todos failed"),
            }
        });
    };

    view! {
        <li data-index=index.to_string()>
            <div class="view">
                <div class="round">
                    <input
                        type="checkbox"
                        id=dom_id.clone()
                        checked=is_completed
                        on:change=toggle_todo
                    />
                    <label for=dom_id />
                </div>
            </div>

            <div class=label_class>
                <div>{text}</div>
            </div>

            <button class="closeBtn" on:click=remove_todo>"x"</button>
        </li>
    }
}
