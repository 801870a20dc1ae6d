//! File handlers.

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use base64::prelude::{Engine, BASE64_STANDARD};
use std::sync::Arc;

use crate::file::{CreateFileRequest, FileKind, FileRepository, FileService};
use crate::thumbnail::ThumbnailJob;
use crate::web::dto::{DataQuery, FileResponse, ListQuery, UploadRequest};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::{AuthUser, OptionalAuthUser};

/// POST /files - upload a file or create a folder.
///
/// Image uploads additionally enqueue a thumbnail job; the response never
/// waits for the worker.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(req): Json<UploadRequest>,
) -> Result<(StatusCode, Json<FileResponse>), ApiError> {
    let kind: FileKind = req
        .kind
        .parse()
        .map_err(|_| ApiError::unprocessable("invalid type"))?;

    let data = match req.data {
        Some(ref encoded) => Some(
            BASE64_STANDARD
                .decode(encoded)
                .map_err(|_| ApiError::unprocessable("data is not valid base64"))?,
        ),
        None => None,
    };

    if let Some(ref bytes) = data {
        if bytes.len() as u64 > state.max_upload_size {
            let max_mb = state.max_upload_size / 1024 / 1024;
            return Err(ApiError::unprocessable(format!(
                "file too large (max {max_mb}MB)"
            )));
        }
    }

    let service = FileService::new(state.db.pool(), &state.storage);
    let record = service
        .create(
            user.id,
            CreateFileRequest {
                name: req.name,
                kind,
                parent_id: req.parent_id,
                is_public: req.is_public,
                data,
            },
        )
        .await?;

    if record.kind == FileKind::Image {
        state.queue.enqueue(ThumbnailJob {
            user_id: user.id,
            file_id: record.id,
        });
    }

    Ok((StatusCode::CREATED, Json(FileResponse::from(record))))
}

/// GET /files/:id - metadata of an owned file.
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(file_id): Path<i64>,
) -> Result<Json<FileResponse>, ApiError> {
    let repo = FileRepository::new(state.db.pool());

    let record = repo
        .get_owned(user.id, file_id)
        .await?
        .ok_or_else(|| ApiError::not_found("file not found"))?;

    Ok(Json(FileResponse::from(record)))
}

/// GET /files?parentId=&page= - list the caller's children of a folder.
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<FileResponse>>, ApiError> {
    let repo = FileRepository::new(state.db.pool());

    let records = repo
        .list_children(user.id, query.parent_id(), query.page())
        .await?;

    Ok(Json(records.into_iter().map(FileResponse::from).collect()))
}

/// PUT /files/:id/publish - make a file public.
pub async fn publish(
    state: State<Arc<AppState>>,
    user: AuthUser,
    file_id: Path<i64>,
) -> Result<Json<FileResponse>, ApiError> {
    set_publication(state, user, file_id, true).await
}

/// PUT /files/:id/unpublish - make a file private.
pub async fn unpublish(
    state: State<Arc<AppState>>,
    user: AuthUser,
    file_id: Path<i64>,
) -> Result<Json<FileResponse>, ApiError> {
    set_publication(state, user, file_id, false).await
}

async fn set_publication(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(file_id): Path<i64>,
    is_public: bool,
) -> Result<Json<FileResponse>, ApiError> {
    let repo = FileRepository::new(state.db.pool());

    let record = repo
        .set_publication(user.id, file_id, is_public)
        .await?
        .ok_or_else(|| ApiError::not_found("file not found"))?;

    Ok(Json(FileResponse::from(record)))
}

/// GET /files/:id/data?size= - serve content bytes.
///
/// The only route tolerating anonymous viewers; visibility rules live in
/// the file service. A `size` of 500, 250 or 100 serves that variant, any
/// other value serves the original.
pub async fn file_data(
    State(state): State<Arc<AppState>>,
    OptionalAuthUser(viewer): OptionalAuthUser,
    Path(file_id): Path<i64>,
    Query(query): Query<DataQuery>,
) -> Result<Response<Body>, ApiError> {
    let service = FileService::new(state.db.pool(), &state.storage);

    let (record, bytes) = service
        .get_content(viewer.map(|u| u.id), file_id, query.thumbnail_size())
        .await?;

    let content_type = mime_guess::from_path(&record.name)
        .first_or_octet_stream()
        .to_string();

    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, bytes.len())
        .body(Body::from(bytes))
        .map_err(|e| {
            tracing::error!("failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })
}
