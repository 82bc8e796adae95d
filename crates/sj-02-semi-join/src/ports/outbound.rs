//! Outbound Ports (Driven Ports)
//!
//! These traits define what the semi-join needs from the systems holding
//! the data.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::SourceError;

/// Key-value source (Driven Port)
///
/// A source enumerates its keys once per join and is asked for values only
/// of keys that matched. Keys are expected to be unique within a source.
#[async_trait]
pub trait KeyValueSource: Send + Sync {
    /// Value type attached to each key, logged when its key matches
    type Value: Clone + Debug + Send + Sync;

    /// Name used in logs and errors
    fn name(&self) -> &str;

    /// Every key held by the source, in the source's order
    async fn list_all_keys(&self) -> Result<Vec<String>, SourceError>;

    /// Value stored under `key`
    ///
    /// Returns `SourceError::KeyNotFound` when the key is absent.
    async fn get_value(&self, key: &str) -> Result<Self::Value, SourceError>;
}
