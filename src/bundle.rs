//! Key-value snapshot used for creation parameters and saved state.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// String-keyed map of JSON values.
///
/// The controller never interprets the contents; how a bundle is persisted
/// is up to the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bundle {
    entries: BTreeMap<String, Value>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a serializable value under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns the serialization error and leaves the bundle unchanged if
    /// `value` has no JSON form (for example a map with non-string keys).
    pub fn put<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: T,
    ) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(value)?;
        self.entries.insert(key.into(), value);
        Ok(())
    }

    /// Builder form of [`Bundle::put`]. A value that fails to serialize is
    /// skipped with a warning.
    pub fn with<T: Serialize>(mut self, key: impl Into<String>, value: T) -> Self {
        let key = key.into();
        if let Err(e) = self.put(key.clone(), value) {
            tracing::warn!(key = %key, error = %e, "Skipping unserializable bundle value");
        }
        self
    }

    /// Read `key` back as `T`. Returns `None` if missing or of another shape.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.entries.get(key)?;
        serde_json::from_value(value.clone()).ok()
    }

    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
