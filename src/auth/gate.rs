//! Auth gate: turns decoded credentials or a session token into a verified
//! user.
//!
//! Credential decoding (Basic pairs, bearer extraction) stays at the web
//! boundary; this component only accepts already-decoded inputs.

use sqlx::SqlitePool;

use super::password::verify_password;
use super::session::SessionStore;
use crate::db::{User, UserRepository};
use crate::{DepotError, Result};

/// Verifies identities against the credential store and the session store.
#[derive(Clone)]
pub struct AuthGate {
    pool: SqlitePool,
    sessions: SessionStore,
}

impl AuthGate {
    /// Create a new gate over the user table and session store.
    pub fn new(pool: SqlitePool, sessions: SessionStore) -> Self {
        Self { pool, sessions }
    }

    /// Check an email/password pair.
    ///
    /// An unknown email and a wrong password fail identically, so callers
    /// cannot enumerate accounts. Storage failures propagate as transient
    /// errors, not as `Unauthorized`.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let repo = UserRepository::new(&self.pool);
        let user = repo
            .get_by_email(email)
            .await?
            .ok_or(DepotError::Unauthorized)?;

        verify_password(password, &user.password_hash)?;
        Ok(user)
    }

    /// Resolve a bearer token to its user.
    ///
    /// Fails `Unauthorized` if the token is absent, expired, or the user no
    /// longer exists.
    pub async fn identify(&self, token: &str) -> Result<User> {
        let user_id = self
            .sessions
            .resolve(token)
            .await?
            .ok_or(DepotError::Unauthorized)?;

        let repo = UserRepository::new(&self.pool);
        repo.get_by_id(user_id)
            .await?
            .ok_or(DepotError::Unauthorized)
    }
}
