use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use depot::cache::{MemoryCache, RedisCache, TokenCache};
use depot::thumbnail::{JobQueue, ThumbnailWorker};
use depot::web::handlers::AppState;
use depot::{BlobStorage, Config, Database, DepotError, WebServer};

#[tokio::main]
async fn main() -> depot::Result<()> {
    // Load configuration
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "depot.toml".to_string());
    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = depot::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
    }

    info!("depot - multi-user file storage service");

    // Open backends; all shared clients are created here and injected.
    let db = Database::open(&config.database.path).await?;

    let cache: Arc<dyn TokenCache> = match config.cache.backend.as_str() {
        "redis" => {
            let cache = RedisCache::connect(&config.cache.url).await?;
            info!("session cache: redis at {}", config.cache.url);
            Arc::new(cache)
        }
        "memory" => {
            info!("session cache: in-process memory");
            Arc::new(MemoryCache::new())
        }
        other => {
            return Err(DepotError::Config(format!(
                "unknown cache backend: {other}"
            )));
        }
    };

    let storage = BlobStorage::new(&config.storage.path)?;
    info!("blob storage at {}", config.storage.path);

    // Thumbnail pipeline: the queue's sending half goes to the web layer,
    // the worker consumes independently.
    let (queue, rx) = JobQueue::channel();
    let worker = ThumbnailWorker::new(db.pool().clone(), storage.clone(), rx);
    let _worker_handle = worker.spawn();

    let app_state = Arc::new(AppState::new(
        db,
        cache,
        storage,
        queue,
        Duration::from_secs(config.cache.session_ttl_secs),
        config.storage.max_upload_size_mb * 1024 * 1024,
    ));

    WebServer::new(&config.server, app_state)?.run().await
}
