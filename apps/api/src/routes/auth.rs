use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::auth::{self, AuthAdmin};
use crate::errors::AppError;
use crate::models::admin::{AdminProfile, ChangePasswordRequest, LoginRequest, LoginResponse};
use crate::routes::json::ApiJson;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handle_login))
        .route("/me", get(handle_me))
        .route("/password", put(handle_change_password))
}

/// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = auth::login(&state.db, &state.tokens, &req.email, &req.password).await?;
    Ok(Json(response))
}

/// GET /api/auth/me
pub async fn handle_me(
    admin: AuthAdmin,
    State(state): State<AppState>,
) -> Result<Json<AdminProfile>, AppError> {
    Ok(Json(auth::current_admin(&state.db, &admin.id).await?))
}

/// PUT /api/auth/password
pub async fn handle_change_password(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ChangePasswordRequest>,
) -> Result<Json<Value>, AppError> {
    auth::change_password(&state.db, &admin.id, &req.current_password, &req.new_password).await?;
    Ok(Json(json!({ "message": "Password updated successfully" })))
}
