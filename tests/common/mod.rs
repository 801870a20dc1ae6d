//! Test helpers for web API integration tests.

use std::sync::Arc;
use std::time::Duration;

use axum::http::header::AUTHORIZATION;
use axum_test::TestServer;
use base64::prelude::{Engine, BASE64_STANDARD};
use serde_json::{json, Value};
use tempfile::TempDir;

use depot::cache::{MemoryCache, TokenCache};
use depot::thumbnail::{JobQueue, ThumbnailWorker};
use depot::web::handlers::AppState;
use depot::web::router::create_router;
use depot::{BlobStorage, Database};

/// A fully wired test application: in-memory database, memory cache,
/// tempdir blob storage, and the thumbnail worker held for manual draining.
pub struct TestApp {
    pub server: TestServer,
    pub db: Database,
    pub storage: BlobStorage,
    pub queue: JobQueue,
    pub worker: ThumbnailWorker,
    _blob_root: TempDir,
}

/// Spin up a test application.
///
/// The worker is not spawned; tests drive it deterministically with
/// `worker.drain()`.
pub async fn spawn_app() -> TestApp {
    let db = Database::open_in_memory()
        .await
        .expect("failed to create test database");

    let cache: Arc<dyn TokenCache> = Arc::new(MemoryCache::new());

    let blob_root = TempDir::new().expect("failed to create blob tempdir");
    let storage = BlobStorage::new(blob_root.path()).expect("failed to create blob storage");

    let (queue, rx) = JobQueue::channel();
    let worker = ThumbnailWorker::new(db.pool().clone(), storage.clone(), rx);

    let app_state = Arc::new(AppState::new(
        db.clone(),
        cache,
        storage.clone(),
        queue.clone(),
        Duration::from_secs(24 * 60 * 60),
        10 * 1024 * 1024,
    ));

    let router = create_router(app_state, &[]);
    let server = TestServer::new(router).expect("failed to create test server");

    TestApp {
        server,
        db,
        storage,
        queue,
        worker,
        _blob_root: blob_root,
    }
}

/// Register a user; returns the response body.
pub async fn register_user(server: &TestServer, email: &str, password: &str) -> Value {
    let response = server
        .post("/users")
        .json(&json!({ "email": email, "password": password }))
        .await;

    response.json::<Value>()
}

/// Register a user and log in; returns (user_id, token).
pub async fn register_and_connect(server: &TestServer, email: &str, password: &str) -> (i64, String) {
    let body = register_user(server, email, password).await;
    let user_id = body["id"].as_i64().expect("registration returned no id");
    let token = connect(server, email, password).await;
    (user_id, token)
}

/// Exchange credentials for a session token.
pub async fn connect(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .get("/connect")
        .add_header(AUTHORIZATION, basic_auth(email, password))
        .await;
    response.assert_status_ok();

    response.json::<Value>()["token"]
        .as_str()
        .expect("connect returned no token")
        .to_string()
}

/// Build an HTTP Basic Authorization header value.
pub fn basic_auth(email: &str, password: &str) -> String {
    format!(
        "Basic {}",
        BASE64_STANDARD.encode(format!("{email}:{password}"))
    )
}

/// Build a Bearer Authorization header value.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Upload a file or folder; returns the response body.
pub async fn upload(server: &TestServer, token: &str, body: Value) -> Value {
    let response = server
        .post("/files")
        .add_header(AUTHORIZATION, bearer(token))
        .json(&body)
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    response.json::<Value>()
}

/// Base64-encode bytes for an upload payload.
pub fn encode_data(bytes: &[u8]) -> String {
    BASE64_STANDARD.encode(bytes)
}
