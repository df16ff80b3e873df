//! Store Entry Module
//!
//! Defines the record the in-memory backend keeps per key, with TTL
//! bookkeeping.

use chrono::Utc;

// == Store Entry ==
/// A single stored payload with expiry metadata.
#[derive(Debug, Clone)]
pub struct StoreEntry {
    /// The serialized payload
    pub value: String,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<i64>,
}

impl StoreEntry {
    // == Constructor ==
    /// Creates a new entry from a serialized payload and a TTL in seconds.
    ///
    /// A TTL of 0 means the entry never expires, matching the store
    /// convention.
    pub fn new(value: String, ttl_seconds: u64) -> Self {
        let now = now_ms();
        let expires_at = if ttl_seconds == 0 {
            None
        } else {
            Some(now + (ttl_seconds as i64) * 1000)
        };

        Self {
            value,
            created_at: now,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches the expiration
    /// time; entries without a TTL never expire.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => now_ms() >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL in seconds, or None if no expiration is set.
    ///
    /// Returns `Some(0)` once the entry has expired.
    pub fn ttl_remaining(&self) -> Option<u64> {
        self.expires_at.map(|expires| {
            let now = now_ms();
            if expires > now {
                ((expires - now) / 1000) as u64
            } else {
                0
            }
        })
    }
}

// == Utility Functions ==
/// Returns the current Unix timestamp in milliseconds.
fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
