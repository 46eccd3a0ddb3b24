//! GraphQL Transport
//!
//! HTTP client, websocket subscriptions and the typed operations the views use.

mod client;
mod response;
pub mod operations;
pub mod subscription;

pub use client::GraphqlClient;
pub use response::{Fetched, GraphqlErrorEntry, GraphqlResponse};

/// Errors surfaced by queries, mutations and subscriptions
#[derive(Debug, thiserror::Error)]
pub enum GraphqlError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded with HTTP {0}")]
    Status(u16),

    #[error("{0}")]
    Graphql(String),

    #[error("response carried no data")]
    MissingData,

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("subscription socket: {0}")]
    Socket(String),
}
