//! End-to-end walk-through of the transient cache layer.
//!
//! Wires the in-memory backend into a pool and a facade, then runs the
//! singular, bulk, and expiry flows.
//!
//! Run with: `cargo run --example demo`

use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

use anyhow::Result;
use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use transient_cache::{Config, Expiration, MemoryStore, TransientCache, TransientPool};

fn main() -> Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "debug" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "transient_cache=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: max_value_bytes={}, flush_enabled={}",
        config.max_value_bytes, config.flush_enabled
    );

    let store = Arc::new(MemoryStore::from_config(&config));
    let pool = TransientPool::new(store.clone());
    let cache = TransientCache::new(pool.clone());

    // Singular operations through the facade
    cache.set("greeting", "hello", Expiration::Never)?;
    info!("greeting = {}", cache.get("greeting", serde_json::Value::Null)?);

    // A literal false survives the round trip and beats the default
    cache.set("feature_enabled", false, Expiration::Never)?;
    info!(
        "feature_enabled = {} (default would have been true)",
        cache.get("feature_enabled", json!(true))?
    );

    // Bulk operations
    cache.set_multiple([("a", json!(1)), ("b", json!(2))], 60u64)?;
    let values = cache.get_multiple(["a", "b", "c"], json!(0))?;
    info!("bulk values = {:?}", values);

    // Item-level access through the pool
    let mut item = pool.get_item("answer")?;
    item.set(json!(42)).expires_after(chrono::TimeDelta::minutes(5));
    pool.save(&mut item);
    info!(
        "answer is_hit={} value={:?}",
        pool.get_item("answer")?.is_hit(),
        pool.get_item("answer")?.get()
    );

    // TTL expiry
    cache.set("ephemeral", "soon gone", 1u64)?;
    info!("ephemeral before expiry: has={}", cache.has("ephemeral")?);
    sleep(Duration::from_millis(1100));
    info!("ephemeral after expiry: has={}", cache.has("ephemeral")?);

    // Global clear, capability permitting
    info!("clear() -> {}", pool.clear());

    Ok(())
}
