//! Persistent key-value store.
//!
//! Every storefront collection is one JSON document under a fixed key. The
//! [`KeyValueStore`] wraps an injected [`StorageBackend`] and handles the JSON
//! encoding; there is no transaction spanning more than one key.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use crate::errors::Result;
use serde::{Serialize, de::DeserializeOwned};
use std::future::Future;
use std::sync::Arc;
use tracing::{trace, warn};

/// Storage key for the product collection
pub const PRODUCTS_KEY: &str = "electrotech_products";
/// Storage key for the category collection
pub const CATEGORIES_KEY: &str = "electrotech_categories";
/// Storage key for the order collection
pub const ORDERS_KEY: &str = "electrotech_orders";
/// Storage key for the config record
pub const CONFIG_KEY: &str = "electrotech_config";

/// Raw string storage addressed by key.
pub trait StorageBackend: Send + Sync {
    /// Returns the stored text, `None` if the key was never written.
    fn get_raw(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Inserts or replaces the text stored under `key`.
    fn set_raw(&self, key: &str, value: String) -> impl Future<Output = Result<()>> + Send;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<()>> + Send;
}

/// JSON-typed view over a [`StorageBackend`].
pub struct KeyValueStore<B> {
    backend: Arc<B>,
}

impl<B> Clone for KeyValueStore<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: StorageBackend> KeyValueStore<B> {
    /// Wraps a backend.
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// The underlying backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Reads `key`, returning `default()` when it is absent or fails to parse.
    ///
    /// Malformed data is logged and otherwise ignored; it stays in storage
    /// until the next [`set`](Self::set) overwrites it.
    pub async fn get_or_else<T, F>(&self, key: &str, default: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let Some(raw) = self.backend.get_raw(key).await? else {
            trace!(key, "key absent, using default");
            return Ok(default());
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(key, error = %e, "stored value is malformed, using default");
                Ok(default())
            }
        }
    }

    /// Reads `key`, falling back to `T::default()`.
    pub async fn get<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        self.get_or_else(key, T::default).await
    }

    /// Whether anything is stored under `key`, parseable or not.
    pub async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.backend.get_raw(key).await?.is_some())
    }

    /// Serializes `value` and stores it under `key`.
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + Sync + ?Sized,
    {
        let raw = serde_json::to_string(value)?;
        trace!(key, bytes = raw.len(), "writing value");
        self.backend.set_raw(key, raw).await
    }

    /// Deletes `key`.
    pub async fn remove(&self, key: &str) -> Result<()> {
        self.backend.remove(key).await
    }
}
