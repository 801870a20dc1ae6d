//! depot - multi-user file storage service
//!
//! Users authenticate, upload files or folders, organize them in a tree,
//! mark them public or private, and retrieve content or generated
//! thumbnails. Sessions live in an expiring cache; image uploads feed an
//! asynchronous thumbnail worker through a job queue.

pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod thumbnail;
pub mod web;

pub use auth::{
    hash_password, register, validate_password, verify_password, AuthGate, SessionStore,
    SESSION_TTL,
};
pub use cache::{MemoryCache, RedisCache, TokenCache};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{DepotError, Result};
pub use file::{
    BlobStorage, CreateFileRequest, FileKind, FileRecord, FileRepository, FileService,
    NewFileRecord, PAGE_SIZE, ROOT_PARENT_ID,
};
pub use thumbnail::{JobQueue, ThumbnailJob, ThumbnailWorker, THUMBNAIL_SIZES};
pub use web::WebServer;
