//! GraphQL response envelope

use serde::Deserialize;

use super::GraphqlError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphqlErrorEntry {
    pub message: String,
}

/// `{ data, errors }` as sent by the server
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlErrorEntry>,
}

/// Data of a query together with any errors that came alongside it
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub data: T,
    pub errors: Vec<GraphqlErrorEntry>,
}

fn join_messages(errors: &[GraphqlErrorEntry]) -> String {
    errors.iter().map(|e| e.message.as_str()).collect::<Vec<_>>().join("; ")
}

impl<T> GraphqlResponse<T> {
    /// Keep partial results; fail only when there is no data at all
    pub fn into_fetched(self) -> Result<Fetched<T>, GraphqlError> {
        match self.data {
            Some(data) => Ok(Fetched { data, errors: self.errors }),
            None if self.errors.is_empty() => Err(GraphqlError::MissingData),
            None => Err(GraphqlError::Graphql(join_messages(&self.errors))),
        }
    }
}

impl<T> Fetched<T> {
    pub fn is_partial(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Reject results that came with errors
    pub fn into_complete(self) -> Result<T, GraphqlError> {
        if self.errors.is_empty() {
            Ok(self.data)
        } else {
            Err(GraphqlError::Graphql(join_messages(&self.errors)))
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        Fetched { data: f(self.data), errors: self.errors }
    }
}
