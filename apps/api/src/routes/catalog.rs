//! Collection-specific listings layered on top of the generic CRUD routes.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::errors::AppError;
use crate::models::project::Project;
use crate::models::skill::Skill;
use crate::routes::crud::resource_routes;
use crate::state::AppState;
use crate::store::Repository;

pub fn project_routes() -> Router<AppState> {
    resource_routes::<Project>().route("/featured", get(handle_featured_projects))
}

pub fn skill_routes() -> Router<AppState> {
    resource_routes::<Skill>().route("/category/:category", get(handle_skills_by_category))
}

/// GET /api/projects/featured
pub async fn handle_featured_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<Project>>, AppError> {
    let projects = Repository::<Project>::new(state.db)
        .list_where("featured", true)
        .await?;
    Ok(Json(projects))
}

/// GET /api/skills/category/:category
/// Exact, case-sensitive match on the category name.
pub async fn handle_skills_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Skill>>, AppError> {
    let skills = Repository::<Skill>::new(state.db)
        .list_where("category", category)
        .await?;
    Ok(Json(skills))
}
