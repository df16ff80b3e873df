//! Cache Module
//!
//! The adaptation layer: key validation, expiration normalization, lazily
//! resolved cache items, the item pool, and the key/value facade.

mod expiration;
mod facade;
mod item;
mod keys;
mod pool;


// Re-export public types
pub use expiration::Expiration;
pub use facade::TransientCache;
pub use item::CacheItem;
pub use keys::validate_key;
pub use pool::TransientPool;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 167;

/// Characters that must not appear in a key
pub const RESERVED_KEY_CHARS: &str = r"{}()/\@:";
