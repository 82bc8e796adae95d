use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

use super::InMemorySource;
use crate::error::SourceError;
use crate::ports::KeyValueSource;

/// Key-value source read from a JSON object file
///
/// The file must hold one top-level object; each member is a key and its
/// value. Keys are listed in file order.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    inner: InMemorySource<Value>,
}

impl JsonFileSource {
    /// Read and parse `path`
    pub async fn load(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let source = Self::parse(name, &raw)?;

        debug!(
            source = source.name(),
            path = %path.display(),
            keys = source.len(),
            "Loaded JSON source"
        );
        Ok(source)
    }

    /// Parse a JSON object document
    pub fn parse(name: impl Into<String>, document: &str) -> Result<Self, SourceError> {
        let name = name.into();
        let object: Map<String, Value> = match serde_json::from_str(document) {
            Ok(Value::Object(object)) => object,
            Ok(other) => {
                return Err(SourceError::Parse(format!(
                    "{}: expected a JSON object, found {}",
                    name,
                    kind_of(&other)
                )))
            }
            Err(e) => return Err(SourceError::Parse(format!("{}: {}", name, e))),
        };

        Ok(Self {
            inner: InMemorySource::from_pairs(name, object),
        })
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl KeyValueSource for JsonFileSource {
    type Value = Value;

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn list_all_keys(&self) -> Result<Vec<String>, SourceError> {
        self.inner.list_all_keys().await
    }

    async fn get_value(&self, key: &str) -> Result<Value, SourceError> {
        self.inner.get_value(key).await
    }
}
