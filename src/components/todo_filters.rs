//! Todo Filters Component
//!
//! Footer of the private list: items left, filter buttons and "Clear completed".

use leptos::prelude::*;

use crate::models::Filter;

#[component]
pub fn TodoFilters(
    #[prop(into)] items_left: Signal<usize>,
    current_filter: ReadSignal<Filter>,
    set_filter: WriteSignal<Filter>,
    #[prop(into)] on_clear_completed: Callback<()>,
) -> impl IntoView {
    let items_left_text = move || {
        let n = items_left.get();
        format!("{} {} left", n, if n == 1 { "item" } else { "items" })
    };

    view! {
        <div class="footerList">
            <span>{items_left_text}</span>

            <ul>
                {Filter::ALL.iter().map(|filter| {
                    let filter = *filter;
                    let is_selected = move || current_filter.get() == filter;
                    view! {
                        <li on:click=move |_| set_filter.set(filter)>
                            <a class=move || if is_selected() { "selected" } else { "" }>
                                {filter.label()}
                            </a>
                        </li>
                    }
                }).collect_view()}
            </ul>

            <button class="clearComp" on:click=move |_| on_clear_completed.run(())>
                "Clear completed"
            </button>
        </div>
    }
}
