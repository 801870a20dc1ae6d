//! File and folder management: metadata, blob storage, and the service
//! orchestrating the two.

mod metadata;
mod service;
mod storage;

pub use metadata::{FileRecord, FileRepository, NewFileRecord, PAGE_SIZE};
pub use service::{CreateFileRequest, FileService};
pub use storage::BlobStorage;

use std::fmt;
use std::str::FromStr;

/// ID of the root of every user's tree. Not a real record.
pub const ROOT_PARENT_ID: i64 = 0;

/// Kind of a stored entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A folder; carries no content and may parent other entities.
    Folder,
    /// A plain file.
    File,
    /// An image; uploads of this kind get thumbnail variants.
    Image,
}

impl FileKind {
    /// String representation as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Folder => "folder",
            FileKind::File => "file",
            FileKind::Image => "image",
        }
    }

    /// Whether entities of this kind carry content bytes.
    pub fn has_content(&self) -> bool {
        !matches!(self, FileKind::Folder)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "folder" => Ok(FileKind::Folder),
            "file" => Ok(FileKind::File),
            "image" => Ok(FileKind::Image),
            other => Err(format!("unknown file kind: {other}")),
        }
    }
}

impl TryFrom<String> for FileKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
