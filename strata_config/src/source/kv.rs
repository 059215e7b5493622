//! Source looking up a single key in a key-value store.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{ByteStream, Source};
use crate::BoxedError;
use crate::{ConfigError, ConfigResult};

/// Key-value store able to fetch one value by key.
pub trait KvStore {
    /// Fetch the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the lookup itself fails, for example
    /// when the store is unreachable.
    fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>, BoxedError>;

    /// Human-readable description used in diagnostics.
    fn describe(&self) -> Cow<'_, str> {
        Cow::Borrowed("key-value store")
    }
}

/// Provides the value stored under one key.
///
/// # Examples
///
/// ```
/// use strata_config::source::{KvSource, MemoryKv, Source};
///
/// let store = MemoryKv::new().with("service/config", br#"{"port": 80}"#.to_vec());
/// assert!(KvSource::new(store.clone(), "service/config").provide().is_ok());
/// assert!(KvSource::new(store, "service/other").provide().is_err());
/// ```
#[derive(Clone, Debug)]
pub struct KvSource<S> {
    store: S,
    key: String,
}

impl<S: KvStore> KvSource<S> {
    /// Look up `key` in `store`.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Key this source looks up.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<S: KvStore> Source for KvSource<S> {
    fn provide(&mut self) -> ConfigResult<ByteStream> {
        match self.store.get(&self.key) {
            Ok(Some(bytes)) => Ok(ByteStream::from_bytes(bytes)),
            Ok(None) => Err(Arc::new(ConfigError::source_failure(
                self.describe(),
                format!("key '{}' doesn't exist", self.key),
            ))),
            Err(e) => Err(Arc::new(ConfigError::source_failure(self.describe(), e))),
        }
    }

    fn describe(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{} key '{}'", self.store.describe(), self.key))
    }
}

/// In-memory [`KvStore`].
#[derive(Clone, Debug, Default)]
pub struct MemoryKv {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryKv {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add an entry, returning the store for chaining.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.entries.insert(key.into(), value.into());
    }
}

impl KvStore for MemoryKv {
    fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>, BoxedError> {
        Ok(self.entries.get(key).cloned())
    }

    fn describe(&self) -> Cow<'_, str> {
        Cow::Borrowed("memory")
    }
}
