//! In-Memory Store Module
//!
//! A thread-safe in-memory backend implementing [`TransientStore`], used by
//! the test suite and the demo, and suitable as the standard backend for
//! hosts without an external store.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::config::Config;
use crate::store::{StoreEntry, TransientStore};

// == Memory Store ==
/// In-memory expiring key/value store.
///
/// Expired entries are treated as absent and pruned as reads encounter
/// them; [`MemoryStore::cleanup_expired`] sweeps the rest on demand. The
/// global flush capability is configuration-controlled so callers can model
/// deployments where it is absent.
#[derive(Debug)]
pub struct MemoryStore {
    /// Key-value storage
    entries: RwLock<HashMap<String, StoreEntry>>,
    /// Maximum serialized value size in bytes; 0 disables the limit
    max_value_bytes: usize,
    /// Whether flush_all is available
    flush_enabled: bool,
}

impl MemoryStore {
    // == Constructors ==
    /// Creates a store with the default configuration.
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    /// Creates a store from a [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_value_bytes: config.max_value_bytes,
            flush_enabled: config.flush_enabled,
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        let removed = before - entries.len();

        if removed > 0 {
            debug!("Expiry sweep removed {} entries", removed);
        }
        removed
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransientStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.write();
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {}
            Some(entry) => return Some(entry.value.clone()),
            None => return None,
        }

        // Expired entries read as absent and are pruned in place
        entries.remove(key);
        None
    }

    fn set(&self, key: &str, value: String, ttl_seconds: u64) -> bool {
        if self.max_value_bytes > 0 && value.len() > self.max_value_bytes {
            debug!(
                "Rejecting value of {} bytes for '{}' (limit {})",
                value.len(),
                key,
                self.max_value_bytes
            );
            return false;
        }

        self.entries
            .write()
            .insert(key.to_string(), StoreEntry::new(value, ttl_seconds));
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.write().remove(key).is_some()
    }

    fn flush_all(&self) -> Option<bool> {
        if !self.flush_enabled {
            return None;
        }
        self.entries.write().clear();
        Some(true)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_store_set_and_get() {
        let store = MemoryStore::new();

        assert!(store.set("key1", "\"value1\"".to_string(), 0));
        assert_eq!(store.get("key1"), Some("\"value1\"".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nonexistent"), None);
        assert!(!store.exists("nonexistent"));
    }

    #[test]
    fn test_store_overwrite() {
        let store = MemoryStore::new();

        store.set("key1", "\"value1\"".to_string(), 0);
        store.set("key1", "\"value2\"".to_string(), 0);

        assert_eq!(store.get("key1"), Some("\"value2\"".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_delete() {
        let store = MemoryStore::new();

        store.set("key1", "\"value1\"".to_string(), 0);
        assert!(store.delete("key1"));
        assert!(store.is_empty());

        // Deleting a missing key reports failure
        assert!(!store.delete("key1"));
    }

    #[test]
    fn test_store_ttl_expiry_on_read() {
        let store = MemoryStore::new();

        store.set("key1", "\"value1\"".to_string(), 1);
        assert!(store.exists("key1"));

        sleep(Duration::from_millis(1100));

        // Expired entry reads as absent and is pruned
        assert_eq!(store.get("key1"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_zero_ttl_never_expires() {
        let store = MemoryStore::new();

        store.set("key1", "\"value1\"".to_string(), 0);
        assert!(store.exists("key1"));
    }

    #[test]
    fn test_store_cleanup_expired() {
        let store = MemoryStore::new();

        store.set("short", "\"v\"".to_string(), 1);
        store.set("long", "\"v\"".to_string(), 60);

        sleep(Duration::from_millis(1100));

        assert_eq!(store.cleanup_expired(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.exists("long"));
    }

    #[test]
    fn test_store_value_too_large() {
        let store = MemoryStore::from_config(&Config {
            max_value_bytes: 8,
            ..Config::default()
        });

        assert!(!store.set("key1", "x".repeat(9), 0));
        assert!(store.is_empty());
        assert!(store.set("key2", "x".repeat(8), 0));
    }

    #[test]
    fn test_store_flush_enabled() {
        let store = MemoryStore::new();

        store.set("key1", "\"value1\"".to_string(), 0);
        assert_eq!(store.flush_all(), Some(true));
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_flush_disabled() {
        let store = MemoryStore::from_config(&Config {
            flush_enabled: false,
            ..Config::default()
        });

        store.set("key1", "\"value1\"".to_string(), 0);
        assert_eq!(store.flush_all(), None);
        assert_eq!(store.len(), 1);
    }
}
