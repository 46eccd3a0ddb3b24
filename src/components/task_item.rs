//! Task Item Component
//!
//! One row of the public feed.

use leptos::prelude::*;

use crate::models::{PublicTodo, TodoView};

#[component]
pub fn TaskItem(index: usize, todo: PublicTodo) -> impl IntoView {
    let label_class = todo.label_class();
    let title = todo.title().to_string();

    view! {
        <li data-index=index.to_string() data-id=todo.id().to_string()>
            <div class="userInfoPublic" title=todo.user.name.clone()>
                "@" {todo.user.name.clone()}
            </div>

            <div class=label_class>
                <div>{title}</div>
            </div>
        </li>
    }
}
