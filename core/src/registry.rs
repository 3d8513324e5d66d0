//! A named, concurrency-safe lookup table.
//!
//! Every table in the crate (renderers, negotiators, transformers, content type names)
//! is a [`Registry`]. Entries are written a handful of times at start-up and read on
//! every request afterwards, so the map sits behind a read-write lock and values are
//! cloned out of it (they are `Arc`s or small strings in practice).

use core::fmt::{self, Debug, Display};
use core::hash::Hash;

use indexmap::{map::Entry, IndexMap};
use parking_lot::RwLock;
use tracing::debug;

use crate::RegistryError;

/// A process-lifetime map from `K` to `V`.
///
/// Keys keep their first-registration order, so [`Registry::keys`] is stable as long
/// as nobody registers concurrently.
pub struct Registry<K, V> {
    name: &'static str,
    entries: RwLock<IndexMap<K, V>>,
}

impl<K, V> Debug for Registry<K, V>
where
    K: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("name", &self.name)
            .field("keys", &self.entries.read().keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<K, V> Registry<K, V>
where
    K: Eq + Hash + Clone + Display,
    V: Clone,
{
    /// Create an empty registry. `name` only shows up in errors and logs.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: RwLock::new(IndexMap::new()),
        }
    }

    /// The name this registry reports in errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Register `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyExists`] if `key` is already registered; the
    /// existing value is left untouched.
    pub fn register(&self, key: K, value: V) -> Result<(), RegistryError> {
        match self.entries.write().entry(key) {
            Entry::Occupied(entry) => Err(RegistryError::AlreadyExists {
                registry: self.name,
                key: entry.key().to_string(),
            }),
            Entry::Vacant(entry) => {
                debug!(registry = self.name, key = %entry.key(), "registered");
                entry.insert(value);
                Ok(())
            }
        }
    }

    /// Register `value` under `key`, replacing any previous value.
    pub fn set(&self, key: K, value: V) {
        debug!(registry = self.name, key = %key, "set");
        self.entries.write().insert(key, value);
    }

    /// Look up the value registered under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if nothing is registered under `key`.
    pub fn get(&self, key: &K) -> Result<V, RegistryError> {
        self.entries
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound {
                registry: self.name,
                key: key.to_string(),
            })
    }

    /// Whether anything is registered under `key`.
    #[must_use]
    pub fn has(&self, key: &K) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Snapshot of the registered keys, in registration order.
    #[must_use]
    pub fn keys(&self) -> Vec<K> {
        self.entries.read().keys().cloned().collect()
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
