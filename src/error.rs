//! Error types for the transient cache layer
//!
//! Provides unified error handling using thiserror.
//!
//! Only key validation raises errors, and always before any store call.
//! Store-level failures (a write that did not stick, a delete of a missing
//! key, an unsupported flush) surface as boolean returns, never as errors.

use thiserror::Error;

use crate::cache::MAX_KEY_LENGTH;

// == Cache Error Enum ==
/// Unified error type for the transient cache layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key is empty
    #[error("Key cannot be empty")]
    EmptyKey,

    /// Key exceeds the maximum length
    #[error("Key exceeds maximum length of {MAX_KEY_LENGTH} bytes: {0}")]
    KeyTooLong(String),

    /// Key contains a reserved character
    #[error("Key contains reserved character '{reserved}': {key}")]
    ReservedCharacter {
        /// The offending key
        key: String,
        /// The first reserved character found in it
        reserved: char,
    },
}

// == Result Type Alias ==
/// Convenience Result type for the transient cache layer.
pub type Result<T> = std::result::Result<T, CacheError>;
