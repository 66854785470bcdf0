use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extractors::AdminUser;
use crate::routes::assets::file_response;
use crate::state::AppState;

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "webp", "svg", "ico"];

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/upload",
            // headroom for the multipart framing around the file itself
            post(upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024)),
        )
        .route("/uploads/{name}", get(serve))
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub path: String,
}

/// Lowercased extension of an uploaded file name, if it is an accepted image type.
fn image_extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    let ext: String = ext
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Stored names are generated, so anything that could leave the uploads dir is unknown.
fn is_safe_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && !name.contains("..")
}

/// POST /api/admin/upload: multipart field `file`, returns the public path
async fn upload(
    State(state): State<AppState>,
    _admin: AdminUser,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original = field.file_name().unwrap_or_default().to_string();
        let ext = image_extension(&original).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Unsupported file type; expected one of {}",
                IMAGE_EXTENSIONS.join(", ")
            ))
        })?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        if data.is_empty() {
            return Err(AppError::BadRequest("Empty file".into()));
        }
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::BadRequest("File too large".into()));
        }

        let name = format!("{}.{}", uuid::Uuid::now_v7(), ext);
        let dir = state.config.uploads_path();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::Internal(format!("Create uploads dir: {}", e)))?;
        tokio::fs::write(dir.join(&name), &data)
            .await
            .map_err(|e| AppError::Internal(format!("Write upload: {}", e)))?;

        tracing::info!("Stored upload {} ({} bytes, from '{}')", name, data.len(), original);
        return Ok(Json(UploadResponse {
            path: format!("/uploads/{}", name),
        }));
    }

    Err(AppError::BadRequest("Missing multipart field 'file'".into()))
}

/// GET /uploads/{name}
async fn serve(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    if !is_safe_name(&name) {
        return StatusCode::NOT_FOUND.into_response();
    }

    match tokio::fs::read(state.config.uploads_path().join(&name)).await {
        Ok(data) => file_response(&name, data),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => StatusCode::NOT_FOUND.into_response(),
        Err(e) => AppError::Internal(format!("Read upload {}: {}", name, e)).into_response(),
    }
}
