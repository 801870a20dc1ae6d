//! Thumbnail worker: consumes jobs and writes resized variants.

use std::io::Cursor;

use image::ImageFormat;
use sqlx::SqlitePool;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::{ThumbnailJob, THUMBNAIL_SIZES};
use crate::file::{BlobStorage, FileRepository};
use crate::Result;

/// Consumer loop producing thumbnail variants for uploaded images.
///
/// Runs decoupled from the upload request that enqueued the job. Processing
/// is idempotent: variant paths are fixed per (file, size) and a retry
/// simply overwrites.
pub struct ThumbnailWorker {
    pool: SqlitePool,
    storage: BlobStorage,
    rx: mpsc::UnboundedReceiver<ThumbnailJob>,
}

impl ThumbnailWorker {
    /// Create a new worker over the given metadata pool, blob store and job
    /// receiver.
    pub fn new(
        pool: SqlitePool,
        storage: BlobStorage,
        rx: mpsc::UnboundedReceiver<ThumbnailJob>,
    ) -> Self {
        Self { pool, storage, rx }
    }

    /// Spawn the worker onto the runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Run until the sending side closes.
    pub async fn run(mut self) {
        info!("thumbnail worker started");

        while let Some(job) = self.rx.recv().await {
            self.handle(&job).await;
        }

        info!("thumbnail worker stopped");
    }

    /// Process everything currently queued, then return.
    ///
    /// Used by tests and by shutdown paths that want to finish outstanding
    /// work without waiting on the channel.
    pub async fn drain(&mut self) {
        while let Ok(job) = self.rx.try_recv() {
            self.handle(&job).await;
        }
    }

    async fn handle(&self, job: &ThumbnailJob) {
        match self.process(job).await {
            Ok(true) => debug!(file_id = job.file_id, "thumbnail variants generated"),
            Ok(false) => debug!(file_id = job.file_id, "job discarded, file is gone"),
            // Failures stay inside the pipeline; the uploader already got
            // its response. Redelivery is the queue's concern, not ours.
            Err(e) => error!(file_id = job.file_id, "thumbnail generation failed: {e}"),
        }
    }

    /// Generate all variants for one job.
    ///
    /// Returns `Ok(false)` when the file record is missing — the job is
    /// discarded, not retried. Missing original bytes are an error and fail
    /// the job.
    pub async fn process(&self, job: &ThumbnailJob) -> Result<bool> {
        let repo = FileRepository::new(&self.pool);

        let Some(file) = repo.get_by_id(job.file_id).await? else {
            return Ok(false);
        };
        let Some(content_ref) = file.content_ref.as_deref() else {
            return Ok(false);
        };

        let original = self.storage.read(content_ref)?;

        for (size, bytes) in render_variants(&original)? {
            self.storage.write_variant(content_ref, size, &bytes)?;
        }

        Ok(true)
    }
}

/// Decode an image and produce one resized copy per fixed width.
///
/// Aspect ratio is preserved; each variant is bounded by its target width
/// and re-encoded in the source format. Order across sizes is not
/// significant.
pub fn render_variants(original: &[u8]) -> Result<Vec<(u32, Vec<u8>)>> {
    let format = image::guess_format(original)?;
    let img = image::load_from_memory_with_format(original, format)?;

    let mut variants = Vec::with_capacity(THUMBNAIL_SIZES.len());
    for size in THUMBNAIL_SIZES {
        let thumb = img.thumbnail(size, u32::MAX);
        let mut buf = Cursor::new(Vec::new());
        thumb.write_to(&mut buf, encodable(format))?;
        variants.push((size, buf.into_inner()));
    }

    Ok(variants)
}

/// Map the sniffed format to one we can encode, falling back to PNG for
/// decode-only formats.
fn encodable(format: ImageFormat) -> ImageFormat {
    match format {
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Gif | ImageFormat::Bmp => format,
        _ => ImageFormat::Png,
    }
}
