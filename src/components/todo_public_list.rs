//! Todo Public List Component
//!
//! Realtime public feed. The subscription reports the newest public todo;
//! the list itself only grows through "load older" and the arrival banner.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::TaskItem;
use crate::context::use_app_context;
use crate::feed::PublicFeed;
use crate::graphql::operations::{self, TodoList, NOTIFY_NEW_PUBLIC_TODOS};
use crate::graphql::subscription::{Subscription, SubscriptionEvent};
use crate::graphql::{Fetched, GraphqlError};
use crate::models::PublicTodo;

/// Record a page result's error state on the feed
fn note_page_errors<T>(feed: &mut PublicFeed, op: &str, result: &Result<Fetched<T>, GraphqlError>) {
    match result {
        Ok(fetched) if fetched.is_partial() => {
            tracing::error!(op, errors = ?fetched.errors, "partial page result");
            feed.mark_error();
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!(op, error = %e, "page fetch failed");
            feed.mark_error();
        }
    }
}

/// Feed body, seeded with the latest todo known when it mounts
#[component]
pub fn TodoPublicList(#[prop(into)] latest_todo: Signal<Option<PublicTodo>>) -> impl IntoView {
    let ctx = use_app_context();
    let feed = RwSignal::new(PublicFeed::new(latest_todo.get_untracked().as_ref()));

    let load_older = move || {
        let Some(cursor) = feed.with_untracked(|f| f.older_request()) else {
            return;
        };
        let client = ctx.client();
        spawn_local(async move {
            let result = operations::get_old_public_todos(&client, cursor).await;
            feed.update(|f| {
                note_page_errors(f, "getOldPublicTodos", &result);
                if let Ok(fetched) = result {
                    tracing::debug!(cursor, rows = fetched.data.len(), "older page");
                    f.apply_older(fetched.data);
                }
            });
        });
    };

    let load_new = move || {
        let cursor = feed.with_untracked(|f| f.newer_request());
        let client = ctx.client();
        spawn_local(async move {
            let result = operations::get_new_public_todos(&client, cursor).await;
            feed.update(|f| {
                note_page_errors(f, "getNewPublicTodos", &result);
                if let Ok(fetched) = result {
                    tracing::debug!(cursor, rows = fetched.data.len(), "newer page");
                    f.apply_new(fetched.data);
                }
            });
        });
    };

    // First older page on mount
    Effect::new(move |_| load_older());

    // Arrivals only bump the banner counter
    Effect::new(move |_| {
        if let Some(latest) = latest_todo.get() {
            let counted = feed
                .try_update(|f| f.on_arrival(&latest))
                .unwrap_or(false);
            if counted {
                tracing::debug!(id = latest.id, "new public todo arrived");
            }
        }
    });

    view! {
        <div class="todoListWrapper" class:feed-error=move || feed.with(|f| f.has_error())>
            {move || feed.with(|f| f.banner()).map(|text| view! {
                <div class="loadMoreSection" on:click=move |_| load_new()>
                    {text}
                </div>
            })}

            <ul>
                <For
                    each=move || feed.with(|f| f.todos().to_vec()).into_iter().enumerate()
                    key=|(index, todo)| (*index, todo.id)
                    children=move |(index, todo)| view! { <TaskItem index=index todo=todo /> }
                />
            </ul>

            <div class="loadMoreSection" on:click=move |_| load_older()>
                {move || feed.with(|f| f.older_label())}
            </div>
        </div>
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FeedPhase {
    Connecting,
    Live,
    Failed,
}

/// Subscribes to the newest public todo and mounts the feed once it is known
#[component]
pub fn TodoPublicListSubscription() -> impl IntoView {
    let ctx = use_app_context();
    let latest = RwSignal::new(None::<PublicTodo>);
    let (phase, set_phase) = signal(FeedPhase::Connecting);

    let started = Subscription::start::<TodoList<PublicTodo>, _>(
        &ctx.config(),
        "notifyNewPublicTodos",
        NOTIFY_NEW_PUBLIC_TODOS,
        move |event| match event {
            SubscriptionEvent::Data(data) => {
                latest.set(data.todos.into_iter().next());
                set_phase.set(FeedPhase::Live);
            }
            SubscriptionEvent::Error(e) => {
                tracing::error!(error = %e, "notifyNewPublicTodos failed");
                set_phase.set(FeedPhase::Failed);
            }
        },
    );

    match started {
        Ok(subscription) => {
            let subscription = StoredValue::new_local(Some(subscription));
            on_cleanup(move || {
                // Dropping the subscription closes its socket
                subscription.update_value(|s| {
                    s.take();
                });
            });
        }
        Err(e) => {
            tracing::error!(error = %e, "could not open subscription socket");
            set_phase.set(FeedPhase::Failed);
        }
    }

    // Only remount on phase changes, not on every pushed todo
    let phase = Memo::new(move |_| phase.get());

    view! {
        {move || match phase.get() {
            FeedPhase::Connecting => view! { <span>"Loading..."</span> }.into_any(),
            FeedPhase::Failed => view! { <span>"Error"</span> }.into_any(),
            FeedPhase::Live => view! { <TodoPublicList latest_todo=latest /> }.into_any(),
        }}
    }
}
