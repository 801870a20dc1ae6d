//! Blob storage for original content and thumbnail variants.
//!
//! Paths are opaque identifiers generated at file-creation time, never
//! derived from user-supplied names. Blobs live in a sharded directory
//! layout:
//!
//! ```text
//! {base_path}/
//! ├── ab/
//! │   ├── ab12cd34-...            (original)
//! │   └── ab12cd34-..._250        (thumbnail variant)
//! └── cd/
//!     └── cd90ab12-...
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::{DepotError, Result};

/// Blob store over a local directory tree.
#[derive(Debug, Clone)]
pub struct BlobStorage {
    base_path: PathBuf,
}

impl BlobStorage {
    /// Create a blob store rooted at `base_path`, creating it if missing.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;

        Ok(Self { base_path })
    }

    /// Get the base path of this store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Generate a fresh opaque path identifier.
    pub fn generate_ref() -> String {
        Uuid::new_v4().to_string()
    }

    /// The storage key of a thumbnail variant.
    pub fn variant_ref(path_id: &str, size: u32) -> String {
        format!("{path_id}_{size}")
    }

    /// Write original content under `path_id`.
    pub fn write(&self, path_id: &str, bytes: &[u8]) -> Result<()> {
        let file_path = self.blob_path(path_id);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&file_path, bytes)?;
        Ok(())
    }

    /// Write a resized variant next to the original. Overwrites on retry.
    pub fn write_variant(&self, path_id: &str, size: u32, bytes: &[u8]) -> Result<()> {
        self.write(&Self::variant_ref(path_id, size), bytes)
    }

    /// Read the blob under `path_id`.
    ///
    /// An absent path fails `NotFound`; never-written and deleted are not
    /// distinguished.
    pub fn read(&self, path_id: &str) -> Result<Vec<u8>> {
        let file_path = self.blob_path(path_id);

        match fs::read(&file_path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(DepotError::NotFound("blob".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Read a thumbnail variant.
    pub fn read_variant(&self, path_id: &str, size: u32) -> Result<Vec<u8>> {
        self.read(&Self::variant_ref(path_id, size))
    }

    /// Check whether a blob exists.
    pub fn exists(&self, path_id: &str) -> bool {
        self.blob_path(path_id).exists()
    }

    /// Delete a blob. Returns whether it existed.
    pub fn delete(&self, path_id: &str) -> Result<bool> {
        match fs::remove_file(self.blob_path(path_id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Full filesystem path for a path id: {base}/{shard}/{path_id}.
    fn blob_path(&self, path_id: &str) -> PathBuf {
        self.base_path.join(Self::shard(path_id)).join(path_id)
    }

    /// Shard directory name: the first two characters of the path id.
    fn shard(path_id: &str) -> &str {
        if path_id.len() >= 2 {
            &path_id[..2]
        } else {
            path_id
        }
    }
}
