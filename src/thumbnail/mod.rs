//! Asynchronous thumbnail generation: job queue and worker.

mod worker;

pub use worker::ThumbnailWorker;

use tokio::sync::mpsc;
use tracing::warn;

/// Fixed thumbnail widths, largest first.
pub const THUMBNAIL_SIZES: [u32; 3] = [500, 250, 100];

/// Work unit linking a user and an uploaded image.
///
/// The worker re-derives everything else from the file store and blob
/// storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailJob {
    /// User who uploaded the image.
    pub user_id: i64,
    /// Image file to generate variants for.
    pub file_id: i64,
}

/// Sending half of the thumbnail job channel.
///
/// Enqueue is fire-and-forget: the upload path never blocks on, or learns
/// about, worker completion.
#[derive(Clone)]
pub struct JobQueue {
    tx: mpsc::UnboundedSender<ThumbnailJob>,
}

impl JobQueue {
    /// Create a queue and the receiver the worker consumes.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ThumbnailJob>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Enqueue a job. Never blocks; a closed channel drops the job with a
    /// warning.
    pub fn enqueue(&self, job: ThumbnailJob) {
        if self.tx.send(job).is_err() {
            warn!("thumbnail worker is gone; job dropped");
        }
    }
}
