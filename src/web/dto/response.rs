//! Response DTOs for the web API.

use serde::Serialize;

use crate::file::FileRecord;

/// User representation in responses. The password hash never leaves the
/// server.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: i64,
    /// Email address.
    pub email: String,
}

impl From<crate::db::User> for UserResponse {
    fn from(user: crate::db::User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Session token response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// Opaque session token.
    pub token: String,
}

/// File representation in responses. Content bytes are never echoed back.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    /// File ID.
    pub id: i64,
    /// Owning user ID.
    pub user_id: i64,
    /// Display name.
    pub name: String,
    /// Entity kind.
    #[serde(rename = "type")]
    pub kind: String,
    /// Visibility.
    pub is_public: bool,
    /// Parent folder ID; 0 means root.
    pub parent_id: i64,
}

impl From<FileRecord> for FileResponse {
    fn from(record: FileRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            name: record.name,
            kind: record.kind.to_string(),
            is_public: record.is_public,
            parent_id: record.parent_id,
        }
    }
}

/// Backend liveness response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Whether the session cache answers.
    pub redis: bool,
    /// Whether the durable store answers.
    pub db: bool,
}

/// Service statistics response.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Number of registered users.
    pub users: i64,
    /// Number of file records.
    pub files: i64,
}
