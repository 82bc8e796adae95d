use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::SourceError;
use crate::ports::KeyValueSource;

/// In-memory key-value source
///
/// Keys are listed in insertion order. Inserting an existing key replaces
/// its value and keeps its position, so keys stay unique.
#[derive(Clone, Debug)]
pub struct InMemorySource<V> {
    name: String,
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> InMemorySource<V> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a source from `(key, value)` pairs
    pub fn from_pairs<K, I>(name: impl Into<String>, pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut source = Self::new(name);
        for (key, value) in pairs {
            source.insert(key, value);
        }
        source
    }

    /// Store `value` under `key`
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

#[async_trait]
impl<V> KeyValueSource for InMemorySource<V>
where
    V: Clone + std::fmt::Debug + Send + Sync,
{
    type Value = V;

    fn name(&self) -> &str {
        &self.name
    }

    async fn list_all_keys(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.keys().map(str::to_owned).collect())
    }

    async fn get_value(&self, key: &str) -> Result<V, SourceError> {
        self.get(key)
            .cloned()
            .ok_or_else(|| SourceError::KeyNotFound {
                source_name: self.name.clone(),
                key: key.to_string(),
            })
    }
}
