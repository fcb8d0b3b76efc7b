use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::auth::AuthAdmin;
use crate::errors::AppError;
use crate::models::contact::{ContactMessage, ContactReceipt, NewContactMessage, UnreadCount};
use crate::routes::json::ApiJson;
use crate::state::AppState;
use crate::store::contact;

pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_list).post(handle_submit))
        .route("/unread/count", get(handle_unread_count))
        .route("/:id", get(handle_get).delete(handle_delete))
        .route("/:id/read", put(handle_mark_read))
}

/// POST /api/contact
/// Public: visitors submit the contact form here.
pub async fn handle_submit(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewContactMessage>,
) -> Result<(StatusCode, Json<ContactReceipt>), AppError> {
    let message = contact::create(&state.db, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ContactReceipt {
            message: "Message sent successfully",
            id: message.id,
        }),
    ))
}

/// GET /api/contact
pub async fn handle_list(
    _admin: AuthAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactMessage>>, AppError> {
    Ok(Json(contact::list(&state.db).await?))
}

/// GET /api/contact/unread/count
pub async fn handle_unread_count(
    _admin: AuthAdmin,
    State(state): State<AppState>,
) -> Result<Json<UnreadCount>, AppError> {
    let count = contact::count_unread(&state.db).await?;
    Ok(Json(UnreadCount { count }))
}

/// GET /api/contact/:id
pub async fn handle_get(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContactMessage>, AppError> {
    Ok(Json(contact::get(&state.db, &id).await?))
}

/// PUT /api/contact/:id/read
pub async fn handle_mark_read(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContactMessage>, AppError> {
    Ok(Json(contact::mark_read(&state.db, &id).await?))
}

/// DELETE /api/contact/:id
pub async fn handle_delete(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    contact::delete(&state.db, &id).await?;
    Ok(Json(json!({ "message": "Message deleted successfully" })))
}
