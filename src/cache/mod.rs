//! Expiring key/value cache used by the session layer.
//!
//! The cache is the only place session tokens live; nothing here touches
//! durable storage. Implementations must provide atomic per-key set/get/del
//! semantics and server-side expiry.

mod memory;
mod redis;

pub use memory::MemoryCache;
pub use redis::RedisCache;

use std::time::Duration;

use async_trait::async_trait;

use crate::Result;

/// Expiring token cache.
///
/// Keys are opaque strings namespaced by the caller. A key that has passed
/// its TTL behaves exactly like a key that was never written.
#[async_trait]
pub trait TokenCache: Send + Sync {
    /// Write a value under `key`, expiring after `ttl`.
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Read the value under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Delete `key`. Returns whether a live key existed.
    async fn del(&self, key: &str) -> Result<bool>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<()>;
}
