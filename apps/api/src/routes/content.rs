use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::auth::AuthAdmin;
use crate::errors::AppError;
use crate::models::content::{
    BulkContentRequest, BulkItemResult, ContentPatch, ContentUpsert, SiteContent,
};
use crate::routes::json::ApiJson;
use crate::state::AppState;
use crate::store::content;

pub fn content_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_list).post(handle_upsert))
        .route("/bulk", post(handle_bulk))
        .route(
            "/:key",
            get(handle_get).put(handle_update).delete(handle_delete),
        )
}

/// GET /api/content
pub async fn handle_list(State(state): State<AppState>) -> Result<Json<Vec<SiteContent>>, AppError> {
    Ok(Json(content::list(&state.db).await?))
}

/// GET /api/content/:key
pub async fn handle_get(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<SiteContent>, AppError> {
    Ok(Json(content::get(&state.db, &key).await?))
}

/// POST /api/content
/// Creates the key or overwrites its value.
pub async fn handle_upsert(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiJson(item): ApiJson<ContentUpsert>,
) -> Result<(StatusCode, Json<SiteContent>), AppError> {
    let row = content::upsert(&state.db, &item).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/content/:key
pub async fn handle_update(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(key): Path<String>,
    ApiJson(patch): ApiJson<ContentPatch>,
) -> Result<Json<SiteContent>, AppError> {
    Ok(Json(content::update(&state.db, &key, patch).await?))
}

/// DELETE /api/content/:key
pub async fn handle_delete(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Value>, AppError> {
    content::delete(&state.db, &key).await?;
    Ok(Json(json!({ "message": "Content deleted successfully" })))
}

/// POST /api/content/bulk
/// Items are applied independently; one failure does not undo the others.
pub async fn handle_bulk(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<BulkContentRequest>,
) -> Json<Vec<BulkItemResult>> {
    Json(content::bulk_upsert(&state.db, &req.items).await)
}
