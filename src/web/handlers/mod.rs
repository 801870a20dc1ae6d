//! API handlers for the web layer.

pub mod auth;
pub mod files;
pub mod status;

pub use auth::*;
pub use files::*;
pub use status::*;

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{AuthGate, SessionStore};
use crate::cache::TokenCache;
use crate::file::BlobStorage;
use crate::thumbnail::JobQueue;
use crate::Database;

/// Application state shared across handlers.
///
/// All backends are opened once at process start and injected here; nothing
/// is referenced as an ambient global.
pub struct AppState {
    /// Metadata database.
    pub db: Database,
    /// Session cache backend.
    pub cache: Arc<dyn TokenCache>,
    /// Session issue/resolve/revoke.
    pub sessions: SessionStore,
    /// Credential and token verification.
    pub gate: AuthGate,
    /// Blob storage for originals and variants.
    pub storage: BlobStorage,
    /// Thumbnail job queue (sending half).
    pub queue: JobQueue,
    /// Maximum accepted upload size in bytes.
    pub max_upload_size: u64,
}

impl AppState {
    /// Assemble application state from its injected backends.
    pub fn new(
        db: Database,
        cache: Arc<dyn TokenCache>,
        storage: BlobStorage,
        queue: JobQueue,
        session_ttl: Duration,
        max_upload_size: u64,
    ) -> Self {
        let sessions = SessionStore::with_ttl(cache.clone(), session_ttl);
        let gate = AuthGate::new(db.pool().clone(), sessions.clone());

        Self {
            db,
            cache,
            sessions,
            gate,
            storage,
            queue,
            max_upload_size,
        }
    }
}
