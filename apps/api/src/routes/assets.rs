use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::get,
    Json, Router,
};
use bytes::BytesMut;
use serde::Serialize;
use serde_json::{json, Value};

use crate::assets::{self, ResumeInfo, StoredResume, MAX_RESUME_BYTES};
use crate::auth::AuthAdmin;
use crate::errors::AppError;
use crate::state::AppState;

/// Multipart field carrying the uploaded file.
const RESUME_FIELD: &str = "resume";

/// Request body cap for the upload route. Larger than the file limit so an
/// oversize resume is reported as "File too large" rather than cut off mid-read.
const UPLOAD_BODY_LIMIT: usize = MAX_RESUME_BYTES * 2;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub resume: StoredResume,
}

pub fn asset_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/resume",
            get(handle_resume_info)
                .post(handle_upload)
                .delete(handle_delete)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/resume/public", get(handle_public_resume_info))
}

/// POST /api/assets/resume
pub async fn handle_upload(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        assets::ensure_pdf(content_type.as_deref())?;

        let mut bytes = BytesMut::new();
        while let Some(chunk) = field.chunk().await? {
            if bytes.len() + chunk.len() > MAX_RESUME_BYTES {
                return Err(assets::too_large());
            }
            bytes.extend_from_slice(&chunk);
        }

        let resume = state
            .resumes
            .save(&bytes, content_type.as_deref(), file_name.as_deref())
            .await?;
        return Ok(Json(UploadResponse {
            message: "Resume uploaded successfully",
            resume,
        }));
    }

    Err(AppError::Validation("No file uploaded".to_string()))
}

/// GET /api/assets/resume/public
pub async fn handle_public_resume_info(
    State(state): State<AppState>,
) -> Result<Json<ResumeInfo>, AppError> {
    Ok(Json(state.resumes.latest().await?.into()))
}

/// GET /api/assets/resume
/// Same answer as the public route, for the dashboard.
pub async fn handle_resume_info(
    _admin: AuthAdmin,
    State(state): State<AppState>,
) -> Result<Json<ResumeInfo>, AppError> {
    Ok(Json(state.resumes.latest().await?.into()))
}

/// DELETE /api/assets/resume
/// Removes every stored resume, succeeding even when there was none.
pub async fn handle_delete(
    _admin: AuthAdmin,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    state.resumes.delete_all().await?;
    Ok(Json(json!({ "message": "Resume deleted successfully" })))
}
