//! Cache Item Module
//!
//! A single addressable cache slot that lazily resolves its hit/value state
//! from the store on first access and memoizes the result for the life of
//! the instance.
//!
//! Values are serialized before they reach the store and deserialized on
//! the way back. The store's transport channel must never carry a bare
//! `false`: `false` is the store's own "absent" signal, so a stored false
//! travels as its serialized form (the string `"false"`), leaving "not
//! found" unambiguous.

use std::sync::Arc;

use serde_json::Value;

use crate::cache::Expiration;
use crate::store::TransientStore;

/// The serialized form of the literal `false`.
const FALSE_PAYLOAD: &str = "false";

// == Item State ==
/// One-shot resolution state of an item.
///
/// Starts unresolved and transitions to `Hit` or `Miss` exactly once, on
/// the first read of the value or hit status. A resolved item is a
/// snapshot of the store at resolution time, not a live view.
#[derive(Debug, Clone, PartialEq)]
enum ItemState {
    /// No store read has happened yet
    Unresolved,
    /// A usable value was found (or set locally)
    Hit(Value),
    /// The store had no usable value
    Miss,
}

// == Cache Item ==
/// A lazily resolved cache slot bound to one validated key.
///
/// Items are created by [`TransientPool::get_item`] and persisted with
/// [`TransientPool::save`]; they cannot be constructed directly, so the
/// pool only ever sees entities of its own making.
///
/// [`TransientPool::get_item`]: crate::cache::TransientPool::get_item
/// [`TransientPool::save`]: crate::cache::TransientPool::save
#[derive(Clone)]
pub struct CacheItem {
    /// Immutable validated key
    key: String,
    /// Handle to the store this item resolves against
    store: Arc<dyn TransientStore>,
    /// Lazy resolution state
    state: ItemState,
    /// Raw expiration expression, normalized at save time
    expiration: Expiration,
}

impl std::fmt::Debug for CacheItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheItem")
            .field("key", &self.key)
            .field("state", &self.state)
            .field("expiration", &self.expiration)
            .finish_non_exhaustive()
    }
}

impl CacheItem {
    // == Constructor ==
    /// Creates an unresolved item. Pool-internal; the key is already
    /// validated.
    pub(crate) fn new(key: String, store: Arc<dyn TransientStore>) -> Self {
        Self {
            key,
            store,
            state: ItemState::Unresolved,
            expiration: Expiration::Never,
        }
    }

    // == Key ==
    /// Returns the item's key. No store call.
    pub fn key(&self) -> &str {
        &self.key
    }

    // == Is Hit ==
    /// Reports whether the item holds a usable value.
    ///
    /// Triggers lazy resolution on first use; subsequent calls reuse the
    /// memoized result without touching the store.
    pub fn is_hit(&mut self) -> bool {
        self.resolve();
        matches!(self.state, ItemState::Hit(_))
    }

    // == Get ==
    /// Returns the resolved value, or `None` on a miss.
    ///
    /// A miss is not an error. Triggers lazy resolution on first use.
    pub fn get(&mut self) -> Option<Value> {
        self.resolve();
        match &self.state {
            ItemState::Hit(value) => Some(value.clone()),
            _ => None,
        }
    }

    // == Set ==
    /// Stores `value` locally and marks the item a hit.
    ///
    /// Pure local mutation; nothing reaches the store until the item is
    /// saved through the pool.
    pub fn set(&mut self, value: Value) -> &mut Self {
        self.state = ItemState::Hit(value);
        self
    }

    // == Expiration ==
    /// Sets an absolute deadline; `None` means no expiration.
    pub fn expires_at(&mut self, deadline: Option<chrono::DateTime<chrono::Utc>>) -> &mut Self {
        self.expiration = match deadline {
            Some(deadline) => Expiration::At(deadline),
            None => Expiration::Never,
        };
        self
    }

    /// Sets a relative duration, raw seconds, or [`Expiration::Never`].
    pub fn expires_after(&mut self, expiration: impl Into<Expiration>) -> &mut Self {
        self.expiration = expiration.into();
        self
    }

    /// Returns the raw stored expiration expression, not yet normalized.
    pub fn expiration(&self) -> &Expiration {
        &self.expiration
    }

    // == Lazy Resolution ==
    /// Resolves the item from the store, at most once per instance.
    ///
    /// A raw payload that deserializes to `false` counts as a hit only when
    /// it is byte-identical to the serialized form of false. Anything else
    /// that claims to be false did not come from a correct round trip and
    /// resolves as a miss.
    fn resolve(&mut self) {
        if self.state != ItemState::Unresolved {
            return;
        }

        self.state = match self.store.get(&self.key) {
            None => ItemState::Miss,
            Some(raw) => match serde_json::from_str::<Value>(&raw) {
                Ok(Value::Bool(false)) if raw != FALSE_PAYLOAD => ItemState::Miss,
                Ok(value) => ItemState::Hit(value),
                Err(_) => ItemState::Miss,
            },
        };
    }
}
