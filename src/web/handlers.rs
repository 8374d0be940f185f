// API handlers for the web server

use super::{
    MAX_BATCH_SIZE, SharedUploader,
    error::ApiError,
    models::{BatchItemResult, UploadRequest, UploadResponse},
};
use axum::{
    Json,
    body::Bytes,
    extract::{Request, State, rejection::BytesRejection},
    http::{Method, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use tracing::{debug, info, warn};
use uuid::Uuid;

const INDEX_PAGE: &str = include_str!("../../static/index.html");

// --- POST /upload ---
// Uploads one image (`image`) or a batch (`images`) to the selected backend
pub async fn upload(
    State(uploader): State<SharedUploader>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let body = body?;
    let request: UploadRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;
    let backend = request.backend();

    let request_id = Uuid::new_v4();

    if let Some(images) = request.images {
        if images.len() > MAX_BATCH_SIZE {
            return Err(ApiError::BadRequest(format!(
                "批量上传最多 {} 张图片",
                MAX_BATCH_SIZE
            )));
        }

        info!(
            "Batch upload request: backend={}, images={}, request_id={}",
            backend,
            images.len(),
            request_id
        );

        let results: Vec<BatchItemResult> = uploader
            .upload_batch(&images, backend)
            .await
            .into_iter()
            .map(BatchItemResult::from)
            .collect();

        debug!(
            "Batch upload completed: {}/{} succeeded, request_id={}",
            results.iter().filter(|r| r.success).count(),
            results.len(),
            request_id
        );

        return Ok(Json(UploadResponse::batch(results)));
    }

    let image = request
        .image
        .filter(|image| !image.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No image provided".to_string()))?;

    info!(
        "Upload request: backend={}, request_id={}",
        backend, request_id
    );

    let result = uploader.upload(&image, backend).await.map_err(|err| {
        warn!("Upload failed: {}, request_id={}", err, request_id);
        ApiError::from(err)
    })?;

    Ok(Json(UploadResponse::single(result)))
}

// --- GET / ---
// Serves the browser upload page
pub async fn index_page() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

// --- GET /health ---
pub async fn health() -> Json<UploadResponse> {
    Json(UploadResponse {
        success: true,
        ..Default::default()
    })
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed("Method not allowed".to_string())
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

// Answers CORS preflight on every path with an empty 200.
// The CORS headers themselves are added by the response header layers.
pub async fn handle_preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(request).await
}
