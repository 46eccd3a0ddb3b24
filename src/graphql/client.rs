//! HTTP GraphQL client

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{Fetched, GraphqlError, GraphqlResponse};
use crate::config::ClientConfig;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphqlRequest<'a, V> {
    query: &'a str,
    operation_name: &'a str,
    variables: &'a V,
}

/// Thin POST-based client for one GraphQL endpoint
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
    authorization: Option<String>,
}

impl GraphqlClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.http_endpoint.clone(),
            authorization: config.authorization(),
        }
    }

    async fn post<V, T>(&self, operation_name: &str, document: &str, variables: &V) -> Result<GraphqlResponse<T>, GraphqlError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let body = GraphqlRequest { query: document, operation_name, variables };
        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(auth) = &self.authorization {
            request = request.header("Authorization", auth);
        }

        tracing::debug!(operation = operation_name, "graphql request");
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GraphqlError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Run a query; partial results (data plus errors) are returned as such
    pub async fn query<V, T>(&self, operation_name: &str, document: &str, variables: &V) -> Result<Fetched<T>, GraphqlError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        self.post(operation_name, document, variables).await?.into_fetched()
    }

    /// Run a mutation; any GraphQL error fails it
    pub async fn mutate<V, T>(&self, operation_name: &str, document: &str, variables: &V) -> Result<T, GraphqlError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        self.post(operation_name, document, variables).await?.into_fetched()?.into_complete()
    }
}
