//! Todo Feed App
//!
//! Main application component: private list beside the realtime public feed.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{TodoPrivateWrapper, TodoPublicWrapper};
use crate::config::ClientConfig;
use crate::context::AppContext;
use crate::store::AppState;

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    // Provide context to all children
    provide_context(AppContext::new(config));
    provide_context(Store::new(AppState::default()));

    view! {
        <div class="app-layout">
            <div class="col-private">
                <TodoPrivateWrapper />
            </div>
            <div class="col-public">
                <TodoPublicWrapper />
            </div>
        </div>
    }
}
