//! Handlers shared by every ordered collection (projects, skills, experience,
//! education, social links). Reads are public, writes require an admin token.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::auth::AuthAdmin;
use crate::errors::AppError;
use crate::routes::json::ApiJson;
use crate::state::AppState;
use crate::store::{Repository, Resource};

/// `GET/POST /` and `GET/PUT/DELETE /:id` for one resource type.
pub fn resource_routes<T: Resource>() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_list::<T>).post(handle_create::<T>))
        .route(
            "/:id",
            get(handle_get::<T>)
                .put(handle_update::<T>)
                .delete(handle_delete::<T>),
        )
}

pub async fn handle_list<T: Resource>(
    State(state): State<AppState>,
) -> Result<Json<Vec<T>>, AppError> {
    let rows = Repository::<T>::new(state.db).list().await?;
    Ok(Json(rows))
}

pub async fn handle_get<T: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<T>, AppError> {
    let row = Repository::<T>::new(state.db).get(&id).await?;
    Ok(Json(row))
}

pub async fn handle_create<T: Resource>(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<T::Create>,
) -> Result<(StatusCode, Json<T>), AppError> {
    let row = Repository::<T>::new(state.db).create(input).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn handle_update<T: Resource>(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<T::Patch>,
) -> Result<Json<T>, AppError> {
    let row = Repository::<T>::new(state.db).update(&id, patch).await?;
    Ok(Json(row))
}

pub async fn handle_delete<T: Resource>(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    Repository::<T>::new(state.db).delete(&id).await?;
    Ok(Json(json!({ "message": format!("{} deleted successfully", T::LABEL) })))
}
