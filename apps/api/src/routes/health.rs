use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// GET /api/health
/// Liveness only; does not touch the store.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
