use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_CONTENT_TYPE: &str = "text";

/// A copy block override keyed by a caller-chosen string such as `hero.title`.
/// Keys the client cannot find fall back to its built-in copy.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /content` and one element of a bulk update.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentUpsert {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Body of `PUT /content/:key`.
#[derive(Debug, Default, Deserialize)]
pub struct ContentPatch {
    pub value: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulkContentRequest {
    pub items: Vec<ContentUpsert>,
}

/// Outcome of one item of a bulk update. Items succeed or fail independently.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BulkItemResult {
    Ok { content: SiteContent },
    Error { key: String, error: String },
}
