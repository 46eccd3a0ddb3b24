//! Public feed section: input above the realtime feed

use leptos::prelude::*;

use crate::components::{TodoInput, TodoPublicListSubscription};

#[component]
pub fn TodoPublicWrapper() -> impl IntoView {
    view! {
        <div class="todoWrapper">
            <div class="sectionHeader">"Public feed (realtime)"</div>
            <TodoInput is_public=true />
            <TodoPublicListSubscription />
        </div>
    }
}
