//! Item Pool Module
//!
//! Factory and batch-operations facade over the store: produces
//! [`CacheItem`]s and performs saves, deletions, and existence probes on
//! their behalf.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{validate_key, CacheItem};
use crate::error::Result;
use crate::store::TransientStore;

// == Transient Pool ==
/// Item factory and persistence facade over a [`TransientStore`].
#[derive(Clone)]
pub struct TransientPool {
    /// The backend every produced item resolves against
    store: Arc<dyn TransientStore>,
}

impl TransientPool {
    // == Constructor ==
    /// Creates a pool over the given store.
    pub fn new(store: Arc<dyn TransientStore>) -> Self {
        Self { store }
    }

    // == Get Item ==
    /// Returns a new unresolved item for `key`.
    ///
    /// No store read happens here; the item resolves lazily on its first
    /// value or hit-status access.
    ///
    /// # Errors
    /// Returns a [`crate::error::CacheError`] if the key fails validation.
    pub fn get_item(&self, key: &str) -> Result<CacheItem> {
        validate_key(key)?;
        Ok(CacheItem::new(key.to_string(), self.store.clone()))
    }

    // == Get Items ==
    /// Returns a map from each key to a new unresolved item.
    ///
    /// Every key is validated before any item is produced; empty input
    /// yields an empty map.
    pub fn get_items<I>(&self, keys: I) -> Result<HashMap<String, CacheItem>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let keys: Vec<String> = keys.into_iter().map(|k| k.as_ref().to_string()).collect();
        for key in &keys {
            validate_key(key)?;
        }

        Ok(keys
            .into_iter()
            .map(|key| {
                let item = CacheItem::new(key.clone(), self.store.clone());
                (key, item)
            })
            .collect())
    }

    // == Has Item ==
    /// Probes the store directly for `key`, bypassing the item abstraction.
    ///
    /// The answer is non-authoritative: the entry may appear or vanish
    /// between this probe and any later read. Callers needing the value
    /// should read it and check the result instead.
    pub fn has_item(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.store.exists(key))
    }

    // == Save ==
    /// Persists an item: normalizes its expiration to a TTL, serializes its
    /// value, and writes both to the store.
    ///
    /// An item that was never set resolves first, so saving it re-persists
    /// whatever the store held (or `null` on a miss). Returns whether the
    /// write succeeded; serialization failure counts as a failed write.
    pub fn save(&self, item: &mut CacheItem) -> bool {
        let ttl = item.expiration().normalize(Utc::now());
        let value = item.get().unwrap_or(Value::Null);

        let payload = match serde_json::to_string(&value) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to serialize value for '{}': {}", item.key(), e);
                return false;
            }
        };

        debug!("Saving '{}' with ttl {}s", item.key(), ttl);
        self.store.set(item.key(), payload, ttl)
    }

    // == Save Deferred ==
    /// Identical to [`TransientPool::save`]; the store offers no batching
    /// to defer into.
    pub fn save_deferred(&self, item: &mut CacheItem) -> bool {
        self.save(item)
    }

    // == Commit ==
    /// No-op; deferred saves are written immediately. Always succeeds.
    pub fn commit(&self) -> bool {
        true
    }

    // == Delete Item ==
    /// Deletes the entry under `key`.
    ///
    /// Returns whether the store reported a successful deletion.
    pub fn delete_item(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.store.delete(key))
    }

    // == Delete Items ==
    /// Deletes every listed entry.
    ///
    /// All keys are validated up front. Every deletion is attempted
    /// regardless of earlier failures; the result is true only when all of
    /// them succeeded.
    pub fn delete_items<I>(&self, keys: I) -> Result<bool>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let keys: Vec<String> = keys.into_iter().map(|k| k.as_ref().to_string()).collect();
        for key in &keys {
            validate_key(key)?;
        }

        let mut all_deleted = true;
        for key in &keys {
            if !self.store.delete(key) {
                all_deleted = false;
            }
        }
        Ok(all_deleted)
    }

    // == Clear ==
    /// Flushes the whole store, if the backend supports it.
    ///
    /// Entries cannot be enumerated through the store interface, so there
    /// is no selective fallback; without the flush capability this fails.
    pub fn clear(&self) -> bool {
        match self.store.flush_all() {
            Some(result) => result,
            None => {
                warn!("Store offers no flush capability; clear() unsupported");
                false
            }
        }
    }
}
