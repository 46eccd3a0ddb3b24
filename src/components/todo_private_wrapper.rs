//! Private section: input above the user's own list

use leptos::prelude::*;

use crate::components::{TodoInput, TodoPrivateList};

#[component]
pub fn TodoPrivateWrapper() -> impl IntoView {
    view! {
        <div class="todoWrapper">
            <div class="sectionHeader">"Personal todos"</div>
            <TodoInput is_public=false />
            <TodoPrivateList />
        </div>
    }
}
