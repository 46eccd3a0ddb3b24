//! Todo Input Component
//!
//! Form for creating a private or public todo.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::graphql::operations;
use crate::store::{self, use_app_store};

#[component]
pub fn TodoInput(is_public: bool) -> impl IntoView {
    let ctx = use_app_context();
    let app_store = use_app_store();

    let (new_title, set_new_title) = signal(String::new());

    let add_todo = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = new_title.get().trim().to_string();
        if title.is_empty() { return; }

        let client = ctx.client();
        spawn_local(async move {
            match operations::insert_todo(&client, &title, is_public).await {
                Ok(inserted) => {
                    set_new_title.set(String::new());
                    // Public todos reach the feed through the subscription
                    match inserted {
                        Some(todo) if !is_public => store::store_prepend_todo(&app_store, todo),
                        _ => {}
                    }
                }
                Err(e) => tracing::warn!(error = %e, "insertTodo failed"),
            }
        });
    };

    view! {
        <form class="formInput" on:submit=add_todo>
            <input
                class="input"
                placeholder="What needs to be done?"
                prop:value=move || new_title.get()
                on:input=move |ev| set_new_title.set(event_target_value(&ev))
            />
            <i class="inputMarker fa fa-angle-right" />
        </form>
    }
}
