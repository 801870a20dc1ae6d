//! Cache-backed session store.
//!
//! Sessions live only in the token cache, never in durable storage; losing
//! the cache logs everyone out, which is an accepted tradeoff. Expiry is the
//! cache's own TTL eviction — there is no sweep here.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::cache::TokenCache;
use crate::Result;

/// Default session lifetime.
pub const SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Issues, resolves and revokes opaque session tokens.
#[derive(Clone)]
pub struct SessionStore {
    cache: Arc<dyn TokenCache>,
    ttl: Duration,
}

impl SessionStore {
    /// Create a session store with the default 24-hour TTL.
    pub fn new(cache: Arc<dyn TokenCache>) -> Self {
        Self {
            cache,
            ttl: SESSION_TTL,
        }
    }

    /// Create a session store with a custom TTL.
    pub fn with_ttl(cache: Arc<dyn TokenCache>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    fn key(token: &str) -> String {
        format!("sessions:{token}")
    }

    /// Issue a fresh token for `user_id`.
    ///
    /// The token is a v4 UUID; uniqueness comes from the generator, no
    /// collision check is performed.
    pub async fn issue(&self, user_id: i64) -> Result<String> {
        let token = Uuid::new_v4().to_string();
        self.cache
            .set_ex(&Self::key(&token), &user_id.to_string(), self.ttl)
            .await?;
        Ok(token)
    }

    /// Resolve a token to its user ID, or `None` if absent or expired.
    pub async fn resolve(&self, token: &str) -> Result<Option<i64>> {
        let value = self.cache.get(&Self::key(token)).await?;
        Ok(value.and_then(|v| v.parse().ok()))
    }

    /// Revoke a token. Returns whether a live session existed.
    ///
    /// Revoking twice is a no-op returning `false`.
    pub async fn revoke(&self, token: &str) -> Result<bool> {
        self.cache.del(&Self::key(token)).await
    }
}
