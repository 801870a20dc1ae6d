//! Middleware for the web API.

pub mod auth;
pub mod cors;

pub use auth::{bearer_token, inject_auth_gate, AuthUser, OptionalAuthUser};
pub use cors::create_cors_layer;
