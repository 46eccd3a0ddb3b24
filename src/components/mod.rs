//! UI Components
//!
//! Leptos components of the private list and the public feed.

mod task_item;
mod todo_filters;
mod todo_input;
mod todo_item;
mod todo_private_list;
mod todo_private_wrapper;
mod todo_public_list;
mod todo_public_wrapper;

pub use task_item::TaskItem;
pub use todo_filters::TodoFilters;
pub use todo_input::TodoInput;
pub use todo_item::TodoItem;
pub use todo_private_list::TodoPrivateList;
pub use todo_private_wrapper::TodoPrivateWrapper;
pub use todo_public_list::TodoPublicListSubscription;
pub use todo_public_wrapper::TodoPublicWrapper;
