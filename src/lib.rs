//! Transient Cache - a key/value cache layer over expiring transient storage
//!
//! Adapts a cache-item pool abstraction and a key/value cache facade onto
//! any backend exposing the [`store::TransientStore`] trait. The layer
//! performs key validation, TTL normalization, and serializes every value
//! before it reaches the store so that the literal boolean `false` survives
//! a round trip through backends whose transport cannot distinguish a
//! stored false from a missing entry.

pub mod cache;
pub mod config;
pub mod error;
pub mod store;

pub use cache::{
    validate_key, CacheItem, Expiration, TransientCache, TransientPool, MAX_KEY_LENGTH,
    RESERVED_KEY_CHARS,
};
pub use config::Config;
pub use error::{CacheError, Result};
pub use store::{MemoryStore, TransientStore};
