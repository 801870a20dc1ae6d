//! File metadata types and repository.

use sqlx::SqlitePool;

use super::FileKind;
use crate::Result;

/// Fixed page size for child listings.
pub const PAGE_SIZE: u32 = 20;

/// Metadata for a file or folder.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FileRecord {
    /// Unique file ID.
    pub id: i64,
    /// Owning user. Immutable after creation.
    pub user_id: i64,
    /// Display name supplied by the owner.
    pub name: String,
    /// Entity kind.
    #[sqlx(try_from = "String")]
    pub kind: FileKind,
    /// Parent folder ID; 0 means root.
    pub parent_id: i64,
    /// Whether anonymous viewers may fetch the content.
    pub is_public: bool,
    /// Opaque blob path. Always present for non-folders, never for folders.
    pub content_ref: Option<String>,
    /// When the record was created.
    pub created_at: String,
}

/// Data for creating a new file record.
#[derive(Debug, Clone)]
pub struct NewFileRecord {
    /// Owning user.
    pub user_id: i64,
    /// Display name.
    pub name: String,
    /// Entity kind.
    pub kind: FileKind,
    /// Parent folder ID; 0 means root.
    pub parent_id: i64,
    /// Initial visibility.
    pub is_public: bool,
    /// Opaque blob path for non-folder kinds.
    pub content_ref: Option<String>,
}

/// Repository for file metadata operations.
pub struct FileRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FileRepository<'a> {
    /// Create a new FileRepository over the given pool.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new file record.
    pub async fn create(&self, file: &NewFileRecord) -> Result<FileRecord> {
        let result = sqlx::query(
            "INSERT INTO files (user_id, name, kind, parent_id, is_public, content_ref, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(file.user_id)
        .bind(&file.name)
        .bind(file.kind.as_str())
        .bind(file.parent_id)
        .bind(file.is_public)
        .bind(&file.content_ref)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| crate::DepotError::NotFound("file".to_string()))
    }

    /// Get a record by ID, regardless of owner or visibility.
    ///
    /// Internal read used by the thumbnail worker; callers serving requests
    /// go through `get_owned` or `resolve_for_serving`.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<FileRecord>> {
        let file = sqlx::query_as::<_, FileRecord>(
            "SELECT id, user_id, name, kind, parent_id, is_public, content_ref, created_at
             FROM files WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(file)
    }

    /// Get a record only if `user_id` owns it.
    ///
    /// An existing record owned by someone else behaves exactly like a
    /// missing one.
    pub async fn get_owned(&self, user_id: i64, id: i64) -> Result<Option<FileRecord>> {
        let file = sqlx::query_as::<_, FileRecord>(
            "SELECT id, user_id, name, kind, parent_id, is_public, content_ref, created_at
             FROM files WHERE id = ? AND user_id = ?",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(file)
    }

    /// List the caller's children of `parent_id`, in insertion order.
    ///
    /// Fixed page size of 20; pages past the end yield an empty vector.
    pub async fn list_children(
        &self,
        user_id: i64,
        parent_id: i64,
        page: u32,
    ) -> Result<Vec<FileRecord>> {
        let offset = i64::from(page) * i64::from(PAGE_SIZE);

        let files = sqlx::query_as::<_, FileRecord>(
            "SELECT id, user_id, name, kind, parent_id, is_public, content_ref, created_at
             FROM files WHERE user_id = ? AND parent_id = ?
             ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(user_id)
        .bind(parent_id)
        .bind(i64::from(PAGE_SIZE))
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(files)
    }

    /// Update visibility, only if `user_id` owns the record.
    ///
    /// Returns the updated record, or `None` when the record does not exist
    /// or belongs to someone else.
    pub async fn set_publication(
        &self,
        user_id: i64,
        id: i64,
        is_public: bool,
    ) -> Result<Option<FileRecord>> {
        let result = sqlx::query("UPDATE files SET is_public = ? WHERE id = ? AND user_id = ?")
            .bind(is_public)
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Resolve a record for serving: public, or owned by the viewer.
    ///
    /// The only read path that tolerates an anonymous viewer.
    pub async fn resolve_for_serving(
        &self,
        viewer: Option<i64>,
        id: i64,
    ) -> Result<Option<FileRecord>> {
        let file = self.get_by_id(id).await?;

        Ok(file.filter(|f| f.is_public || viewer == Some(f.user_id)))
    }

    /// Count all file records.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
