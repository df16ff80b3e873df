//! Configuration Module
//!
//! Handles loading and managing backend configuration from environment
//! variables.

use std::env;

/// Configuration for the in-memory transient store.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum serialized value size in bytes
    pub max_value_bytes: usize,
    /// Whether the store exposes the global flush capability
    pub flush_enabled: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `TRANSIENT_MAX_VALUE_BYTES` - Maximum serialized value size (default: 1 MB)
    /// - `TRANSIENT_FLUSH_ENABLED` - Whether global flush is available (default: true)
    pub fn from_env() -> Self {
        Self {
            max_value_bytes: env::var("TRANSIENT_MAX_VALUE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1024 * 1024),
            flush_enabled: env::var("TRANSIENT_FLUSH_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_value_bytes: 1024 * 1024,
            flush_enabled: true,
        }
    }
}
