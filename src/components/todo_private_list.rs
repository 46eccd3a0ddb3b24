//! Todo Private List Component
//!
//! The current user's todos with a client-side status filter.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{TodoFilters, TodoItem};
use crate::context::use_app_context;
use crate::graphql::operations;
use crate::models::Filter;
use crate::store::{self, use_app_store};
use crate::todos::{active_count, filter_todos};

#[derive(Debug, Clone, PartialEq)]
enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

#[component]
pub fn TodoPrivateList() -> impl IntoView {
    let ctx = use_app_context();
    let app_store = use_app_store();

    let (filter, set_filter) = signal(Filter::All);
    let (status, set_status) = signal(LoadStatus::Loading);

    // Fetch once on mount; filter changes never re-query
    Effect::new(move |_| {
        let client = ctx.client();
        spawn_local(async move {
            match operations::get_my_todos(&client).await {
                Ok(todos) => {
                    tracing::info!(count = todos.len(), "loaded private todos");
                    store::store_load_my_todos(&app_store, todos);
                    set_status.set(LoadStatus::Ready);
                }
                Err(e) => {
                    tracing::error!(error = %e, "getMyTodos failed");
                    set_status.set(LoadStatus::Failed(e.to_string()));
                }
            }
        });
    });

    let visible = Memo::new(move |_| {
        store::store_my_todos(&app_store)
            .map(|todos| filter_todos(todos.value(), filter.get()))
            .unwrap_or_default()
    });
    let pending = move || store::store_my_todos(&app_store).is_some_and(|todos| todos.is_provisional());
    let items_left = Signal::derive(move || visible.with(|todos| active_count(todos)));

    let clear_completed = move |_: ()| {
        let client = ctx.client();
        spawn_local(async move {
            match operations::clear_completed(&client).await {
                Ok(affected) => {
                    tracing::info!(affected, "cleared completed todos");
                    store::store_clear_completed(&app_store);
                }
                Err(e) => tracing::warn!(error = %e, "clearCompleted failed"),
            }
        });
    };

    view! {
        {move || match status.get() {
            LoadStatus::Loading => view! { <div>"Loading..."</div> }.into_any(),
            LoadStatus::Failed(message) => view! { <div>{message}</div> }.into_any(),
            LoadStatus::Ready => view! {
                <div class="todoListWrapper" class:syncing=pending>
                    <ul>
                        <For
                            each=move || visible.get().into_iter().enumerate()
                            key=|(index, todo)| (*index, todo.id, todo.is_completed, todo.title.clone())
                            children=move |(index, todo)| view! { <TodoItem index=index todo=todo /> }
                        />
                    </ul>
                </div>

                <TodoFilters
                    items_left=items_left
                    current_filter=filter
                    set_filter=set_filter
                    on_clear_completed=clear_completed
                />
            }.into_any(),
        }}
    }
}
