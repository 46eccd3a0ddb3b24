//! Application Context
//!
//! Shared configuration and GraphQL client provided via Leptos Context API.

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::graphql::GraphqlClient;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Endpoints and token the app was started with
    config: StoredValue<ClientConfig>,
    /// HTTP client for queries and mutations
    client: StoredValue<GraphqlClient>,
}

impl AppContext {
    pub fn new(config: ClientConfig) -> Self {
        let client = GraphqlClient::new(&config);
        Self {
            config: StoredValue::new(config),
            client: StoredValue::new(client),
        }
    }

    pub fn config(&self) -> ClientConfig {
        self.config.get_value()
    }

    pub fn client(&self) -> GraphqlClient {
        self.client.get_value()
    }
}

/// Get the app context provided by `App`
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
