//! File service: creation and content serving.
//!
//! Orchestrates the metadata repository and blob storage. On create, bytes
//! are persisted before metadata, so a metadata row never points at missing
//! bytes; a crash between the two writes can only leave an orphan blob.

use sqlx::SqlitePool;

use super::metadata::{FileRepository, NewFileRecord};
use super::storage::BlobStorage;
use super::{FileKind, FileRecord, ROOT_PARENT_ID};
use crate::thumbnail::THUMBNAIL_SIZES;
use crate::{DepotError, Result};

/// Request data for creating a file or folder.
#[derive(Debug, Clone)]
pub struct CreateFileRequest {
    /// Display name.
    pub name: String,
    /// Entity kind.
    pub kind: FileKind,
    /// Parent folder ID; 0 means root.
    pub parent_id: i64,
    /// Initial visibility.
    pub is_public: bool,
    /// Content bytes, required for non-folder kinds.
    pub data: Option<Vec<u8>>,
}

/// High-level file operations.
pub struct FileService<'a> {
    pool: &'a SqlitePool,
    storage: &'a BlobStorage,
}

impl<'a> FileService<'a> {
    /// Create a new FileService.
    pub fn new(pool: &'a SqlitePool, storage: &'a BlobStorage) -> Self {
        Self { pool, storage }
    }

    /// Create a file or folder owned by `owner_id`.
    ///
    /// A non-root parent must be a folder owned by the caller. For
    /// non-folder kinds the bytes are written to blob storage under a fresh
    /// path before the metadata insert; if the insert fails the blob is
    /// best-effort deleted.
    pub async fn create(&self, owner_id: i64, request: CreateFileRequest) -> Result<FileRecord> {
        if request.name.trim().is_empty() {
            return Err(DepotError::Validation("name is required".to_string()));
        }

        let repo = FileRepository::new(self.pool);

        if request.parent_id != ROOT_PARENT_ID {
            let parent = repo
                .get_owned(owner_id, request.parent_id)
                .await?
                .ok_or_else(|| DepotError::Validation("parent not found".to_string()))?;

            if parent.kind != FileKind::Folder {
                return Err(DepotError::Validation(
                    "parent is not a folder".to_string(),
                ));
            }
        }

        let content_ref = if request.kind.has_content() {
            let data = request
                .data
                .as_deref()
                .ok_or_else(|| DepotError::Validation("data is required".to_string()))?;

            let path_id = BlobStorage::generate_ref();
            self.storage.write(&path_id, data)?;
            Some(path_id)
        } else {
            None
        };

        let new_record = NewFileRecord {
            user_id: owner_id,
            name: request.name,
            kind: request.kind,
            parent_id: request.parent_id,
            is_public: request.is_public,
            content_ref: content_ref.clone(),
        };

        match repo.create(&new_record).await {
            Ok(record) => Ok(record),
            Err(e) => {
                if let Some(ref path_id) = content_ref {
                    let _ = self.storage.delete(path_id);
                }
                Err(e)
            }
        }
    }

    /// Fetch content for serving.
    ///
    /// Resolves visibility first (public or owned by `viewer`), rejects
    /// folders, then reads the requested variant or the original. A size
    /// outside the fixed thumbnail set serves the original. Missing bytes —
    /// including a thumbnail job that has not completed yet — are `NotFound`.
    pub async fn get_content(
        &self,
        viewer: Option<i64>,
        file_id: i64,
        size: Option<u32>,
    ) -> Result<(FileRecord, Vec<u8>)> {
        let repo = FileRepository::new(self.pool);

        let file = repo
            .resolve_for_serving(viewer, file_id)
            .await?
            .ok_or_else(|| DepotError::NotFound("file".to_string()))?;

        if file.kind == FileKind::Folder {
            return Err(DepotError::Validation(
                "a folder has no content".to_string(),
            ));
        }

        let content_ref = file
            .content_ref
            .as_deref()
            .ok_or_else(|| DepotError::NotFound("blob".to_string()))?;

        let bytes = match size {
            Some(s) if THUMBNAIL_SIZES.contains(&s) => self.storage.read_variant(content_ref, s)?,
            _ => self.storage.read(content_ref)?,
        };

        Ok((file, bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, NewUser, UserRepository};
    use tempfile::TempDir;

    async fn setup() -> (Database, TempDir, BlobStorage, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let tmp = TempDir::new().unwrap();
        let storage = BlobStorage::new(tmp.path()).unwrap();
        let owner = UserRepository::new(db.pool())
            .create(&NewUser::new("owner@example.com", "h"))
            .await
            .unwrap()
            .id;
        (db, tmp, storage, owner)
    }

    fn file_request(name: &str, kind: FileKind, parent_id: i64, data: Option<&[u8]>) -> CreateFileRequest {
        CreateFileRequest {
            name: name.to_string(),
            kind,
            parent_id,
            is_public: false,
            data: data.map(|d| d.to_vec()),
        }
    }

    #[tokio::test]
    async fn test_create_file_writes_bytes_first() {
        let (db, _tmp, storage, owner) = setup().await;
        let service = FileService::new(db.pool(), &storage);

        let record = service
            .create(owner, file_request("notes.txt", FileKind::File, 0, Some(b"hello")))
            .await
            .unwrap();

        // Metadata references bytes that actually exist
        let content_ref = record.content_ref.as_deref().unwrap();
        assert_eq!(storage.read(content_ref).unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_create_folder_has_no_blob() {
        let (db, _tmp, storage, owner) = setup().await;
        let service = FileService::new(db.pool(), &storage);

        let folder = service
            .create(owner, file_request("docs", FileKind::Folder, 0, None))
            .await
            .unwrap();

        assert!(folder.content_ref.is_none());
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let (db, _tmp, storage, owner) = setup().await;
        let service = FileService::new(db.pool(), &storage);

        let result = service
            .create(owner, file_request("  ", FileKind::File, 0, Some(b"x")))
            .await;
        assert!(matches!(result, Err(DepotError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_requires_data_for_files() {
        let (db, _tmp, storage, owner) = setup().await;
        let service = FileService::new(db.pool(), &storage);

        let result = service
            .create(owner, file_request("empty.txt", FileKind::File, 0, None))
            .await;
        assert!(matches!(result, Err(DepotError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_missing_parent() {
        let (db, _tmp, storage, owner) = setup().await;
        let service = FileService::new(db.pool(), &storage);

        let result = service
            .create(owner, file_request("a.txt", FileKind::File, 999, Some(b"x")))
            .await;
        assert!(matches!(result, Err(DepotError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_file_as_parent() {
        let (db, _tmp, storage, owner) = setup().await;
        let service = FileService::new(db.pool(), &storage);

        let file = service
            .create(owner, file_request("a.txt", FileKind::File, 0, Some(b"x")))
            .await
            .unwrap();

        let result = service
            .create(
                owner,
                file_request("b.txt", FileKind::File, file.id, Some(b"y")),
            )
            .await;
        assert!(matches!(result, Err(DepotError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_foreign_parent() {
        let (db, _tmp, storage, owner) = setup().await;
        let service = FileService::new(db.pool(), &storage);

        let other = UserRepository::new(db.pool())
            .create(&NewUser::new("other@example.com", "h"))
            .await
            .unwrap()
            .id;
        let foreign_folder = service
            .create(other, file_request("theirs", FileKind::Folder, 0, None))
            .await
            .unwrap();

        let result = service
            .create(
                owner,
                file_request("a.txt", FileKind::File, foreign_folder.id, Some(b"x")),
            )
            .await;
        assert!(matches!(result, Err(DepotError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_content_original() {
        let (db, _tmp, storage, owner) = setup().await;
        let service = FileService::new(db.pool(), &storage);

        let record = service
            .create(owner, file_request("a.txt", FileKind::File, 0, Some(b"payload")))
            .await
            .unwrap();

        let (file, bytes) = service.get_content(Some(owner), record.id, None).await.unwrap();
        assert_eq!(file.id, record.id);
        assert_eq!(bytes, b"payload");
    }

    #[tokio::test]
    async fn test_get_content_folder_rejected() {
        let (db, _tmp, storage, owner) = setup().await;
        let service = FileService::new(db.pool(), &storage);

        let folder = service
            .create(owner, file_request("docs", FileKind::Folder, 0, None))
            .await
            .unwrap();

        let result = service.get_content(Some(owner), folder.id, None).await;
        assert!(matches!(result, Err(DepotError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_content_anonymous_needs_public() {
        let (db, _tmp, storage, owner) = setup().await;
        let service = FileService::new(db.pool(), &storage);
        let repo = FileRepository::new(db.pool());

        let record = service
            .create(owner, file_request("a.txt", FileKind::File, 0, Some(b"secret")))
            .await
            .unwrap();

        let result = service.get_content(None, record.id, None).await;
        assert!(matches!(result, Err(DepotError::NotFound(_))));

        repo.set_publication(owner, record.id, true).await.unwrap();

        let (_, bytes) = service.get_content(None, record.id, None).await.unwrap();
        assert_eq!(bytes, b"secret");
    }

    #[tokio::test]
    async fn test_get_content_unknown_size_serves_original() {
        let (db, _tmp, storage, owner) = setup().await;
        let service = FileService::new(db.pool(), &storage);

        let record = service
            .create(owner, file_request("pic.png", FileKind::Image, 0, Some(b"img")))
            .await
            .unwrap();

        // 300 is not a thumbnail size; falls back to the original
        let (_, bytes) = service
            .get_content(Some(owner), record.id, Some(300))
            .await
            .unwrap();
        assert_eq!(bytes, b"img");
    }

    #[tokio::test]
    async fn test_get_content_pending_variant_is_not_found() {
        let (db, _tmp, storage, owner) = setup().await;
        let service = FileService::new(db.pool(), &storage);

        let record = service
            .create(owner, file_request("pic.png", FileKind::Image, 0, Some(b"img")))
            .await
            .unwrap();

        // No worker has run; the 250 variant does not exist yet
        let result = service.get_content(Some(owner), record.id, Some(250)).await;
        assert!(matches!(result, Err(DepotError::NotFound(_))));
    }
}
