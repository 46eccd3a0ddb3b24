//! Todo Feed Frontend Entry Point

mod app;
mod cache;
mod components;
mod config;
mod context;
mod feed;
mod graphql;
mod models;
mod store;
mod todos;

use app::App;
use config::ClientConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let (config, load_error) = ClientConfig::load();
    if let Err(e) = console_logger::init(&config.log_level) {
        web_sys::console::warn_1(&format!("[todo-feed] logging disabled: {}", e).into());
    }
    if let Some(e) = load_error {
        tracing::warn!(error = %e, "ignoring stored config override");
    }
    tracing::info!(endpoint = %config.http_endpoint, "starting todo feed");

    mount_to_body(move || view! { <App config=config.clone() /> });
}
