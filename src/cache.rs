//! Query Cache
//!
//! Client-side store of query results keyed by operation name and variables.
//! Confirmed results are kept as JSON values. Optimistic updates are stacked
//! on top as layers that are replayed on every read and dropped when their
//! mutation settles, so a failed mutation rolls back by removing its layer.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cached value could not be encoded or decoded: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Identity of a cached query result: operation name plus canonical variables
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    operation: &'static str,
    variables: String,
}

impl QueryKey {
    pub fn new(operation: &'static str, variables: &Value) -> Self {
        Self { operation, variables: variables.to_string() }
    }

    pub fn name(&self) -> &'static str {
        self.operation
    }
}

/// A cached read: provisional while optimistic layers apply, confirmed otherwise
#[derive(Debug, Clone, PartialEq)]
pub enum Settled<T> {
    Provisional(T),
    Confirmed(T),
}

impl<T> Settled<T> {
    pub fn value(&self) -> &T {
        match self {
            Settled::Provisional(v) | Settled::Confirmed(v) => v,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Settled::Provisional(v) | Settled::Confirmed(v) => v,
        }
    }

    pub fn is_provisional(&self) -> bool {
        matches!(self, Settled::Provisional(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Settled<U> {
        match self {
            Settled::Provisional(v) => Settled::Provisional(f(v)),
            Settled::Confirmed(v) => Settled::Confirmed(f(v)),
        }
    }
}

/// Handle of an optimistic layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(u64);

type Patch = Arc<dyn Fn(&mut Value) -> Result<(), serde_json::Error> + Send + Sync>;

#[derive(Clone)]
struct OptimisticLayer {
    id: LayerId,
    key: QueryKey,
    patch: Patch,
}

impl fmt::Debug for OptimisticLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptimisticLayer")
            .field("id", &self.id)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    confirmed: HashMap<QueryKey, Value>,
    /// Oldest first
    layers: Vec<OptimisticLayer>,
    next_layer: u64,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a result with every pending layer for `key` applied.
    /// `None` when the query has never been written.
    pub fn read_query<T: DeserializeOwned>(&self, key: &QueryKey) -> Result<Option<Settled<T>>, CacheError> {
        let Some(base) = self.confirmed.get(key) else {
            return Ok(None);
        };

        let mut value = base.clone();
        let mut provisional = false;
        for layer in self.layers.iter().filter(|l| &l.key == key) {
            (layer.patch)(&mut value)?;
            provisional = true;
        }

        let data = serde_json::from_value(value)?;
        Ok(Some(if provisional { Settled::Provisional(data) } else { Settled::Confirmed(data) }))
    }

    /// Replace the confirmed result of `key`
    pub fn write_query<T: Serialize>(&mut self, key: QueryKey, data: &T) -> Result<(), CacheError> {
        let value = serde_json::to_value(data)?;
        self.confirmed.insert(key, value);
        Ok(())
    }

    /// Read-modify-write of the confirmed result in one step.
    /// Returns `false` (and leaves the cache untouched) when `key` is absent.
    pub fn update_query<T, F>(&mut self, key: &QueryKey, update: F) -> Result<bool, CacheError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut T),
    {
        let Some(slot) = self.confirmed.get_mut(key) else {
            return Ok(false);
        };
        let mut data: T = serde_json::from_value(slot.clone())?;
        update(&mut data);
        *slot = serde_json::to_value(&data)?;
        Ok(true)
    }

    /// Stack an optimistic patch over `key`
    pub fn push_optimistic<T, F>(&mut self, key: QueryKey, patch: F) -> LayerId
    where
        T: Serialize + DeserializeOwned,
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        let id = LayerId(self.next_layer);
        self.next_layer += 1;

        let patch: Patch = Arc::new(move |value: &mut Value| {
            let mut data: T = serde_json::from_value(value.take())?;
            patch(&mut data);
            *value = serde_json::to_value(&data)?;
            Ok(())
        });
        self.layers.push(OptimisticLayer { id, key, patch });
        id
    }

    /// Drop an optimistic layer. Returns `false` if it was already gone.
    pub fn remove_layer(&mut self, id: LayerId) -> bool {
        let before = self.layers.len();
        self.layers.retain(|l| l.id != id);
        self.layers.len() != before
    }
}
