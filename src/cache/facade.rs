//! Facade Cache Module
//!
//! A key/value convenience API composed from [`TransientPool`] and
//! [`CacheItem`]. Every operation goes through the pool; there is exactly
//! one code path and one validation rule per operation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::cache::{Expiration, TransientPool};
use crate::error::Result;
use crate::store::TransientStore;

// == Transient Cache ==
/// Single-call key/value API over an item pool.
///
/// The pool is injected at construction; [`TransientCache::with_store`]
/// builds the standard pool once for callers that do not bring their own.
#[derive(Clone)]
pub struct TransientCache {
    /// The pool all operations compose through
    pool: TransientPool,
}

impl TransientCache {
    // == Constructors ==
    /// Creates a cache over an existing pool.
    pub fn new(pool: TransientPool) -> Self {
        Self { pool }
    }

    /// Creates a cache with a standard pool over the given store.
    pub fn with_store(store: Arc<dyn TransientStore>) -> Self {
        Self::new(TransientPool::new(store))
    }

    // == Get ==
    /// Returns the value stored under `key`, or `default` on a miss.
    ///
    /// A stored `false` (or `null`) is a hit and comes back as itself,
    /// never as `default`.
    ///
    /// # Errors
    /// Returns a [`crate::error::CacheError`] if the key fails validation.
    pub fn get(&self, key: &str, default: Value) -> Result<Value> {
        let mut item = self.pool.get_item(key)?;
        Ok(item.get().unwrap_or(default))
    }

    // == Set ==
    /// Stores `value` under `key` with the given expiration.
    ///
    /// Returns whether the write succeeded; a value that cannot be
    /// serialized counts as a failed write, not an error.
    pub fn set(
        &self,
        key: &str,
        value: impl Serialize,
        ttl: impl Into<Expiration>,
    ) -> Result<bool> {
        let mut item = self.pool.get_item(key)?;

        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(e) => {
                debug!("Value for '{}' is not serializable: {}", key, e);
                return Ok(false);
            }
        };

        item.set(value).expires_after(ttl);
        Ok(self.pool.save(&mut item))
    }

    // == Delete ==
    /// Removes the entry under `key`. Returns whether the store reported a
    /// successful deletion.
    pub fn delete(&self, key: &str) -> Result<bool> {
        self.pool.delete_item(key)
    }

    // == Has ==
    /// Reports whether `key` currently holds an entry.
    ///
    /// Non-authoritative: the entry may appear or vanish before a later
    /// [`TransientCache::get`] runs. Read the value instead when the answer
    /// matters.
    pub fn has(&self, key: &str) -> Result<bool> {
        self.pool.has_item(key)
    }

    // == Get Multiple ==
    /// Returns a map from every requested key to its value, with misses
    /// filled by `default`.
    ///
    /// Every key is validated before any store read.
    pub fn get_multiple<I>(&self, keys: I, default: Value) -> Result<HashMap<String, Value>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut items = self.pool.get_items(keys)?;

        Ok(items
            .iter_mut()
            .map(|(key, item)| {
                let value = item.get().unwrap_or_else(|| default.clone());
                (key.clone(), value)
            })
            .collect())
    }

    // == Set Multiple ==
    /// Stores every entry with a shared expiration.
    ///
    /// All keys are validated up front. Every write is attempted regardless
    /// of earlier failures; the result is true only when all of them
    /// succeeded.
    pub fn set_multiple<I, K>(&self, entries: I, ttl: impl Into<Expiration>) -> Result<bool>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let entries: Vec<(String, Value)> = entries
            .into_iter()
            .map(|(key, value)| (key.as_ref().to_string(), value))
            .collect();
        for (key, _) in &entries {
            crate::cache::validate_key(key)?;
        }

        let ttl = ttl.into();
        let mut all_saved = true;
        for (key, value) in entries {
            let mut item = self.pool.get_item(&key)?;
            item.set(value).expires_after(ttl);
            if !self.pool.save(&mut item) {
                all_saved = false;
            }
        }
        Ok(all_saved)
    }

    // == Delete Multiple ==
    /// Removes every listed entry; attempts all, returns the conjunction of
    /// the individual results.
    pub fn delete_multiple<I>(&self, keys: I) -> Result<bool>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.pool.delete_items(keys)
    }
}
