use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::content::{
    BulkItemResult, ContentPatch, ContentUpsert, SiteContent, DEFAULT_CONTENT_TYPE,
};

const LABEL: &str = "Content";

/// Ordered by key.
pub async fn list(pool: &SqlitePool) -> Result<Vec<SiteContent>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM site_content ORDER BY key ASC")
        .fetch_all(pool)
        .await
}

pub async fn get(pool: &SqlitePool, key: &str) -> Result<SiteContent, AppError> {
    sqlx::query_as("SELECT * FROM site_content WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found(LABEL))
}

/// Creates or replaces the value under `item.key`.
/// A new key gets type "text" unless one is given; an existing key keeps its
/// type when none is given.
pub async fn upsert(pool: &SqlitePool, item: &ContentUpsert) -> Result<SiteContent, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as(
        r#"
        INSERT INTO site_content (key, value, type, created_at, updated_at)
        VALUES (?, ?, COALESCE(?, ?), ?, ?)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            type = COALESCE(?, site_content.type),
            updated_at = excluded.updated_at
        RETURNING *
        "#,
    )
    .bind(&item.key)
    .bind(&item.value)
    .bind(&item.kind)
    .bind(DEFAULT_CONTENT_TYPE)
    .bind(now)
    .bind(now)
    .bind(&item.kind)
    .fetch_one(pool)
    .await
}

/// Applies each upsert independently. One failing item does not undo or block
/// the others; the result list reports every item in request order.
pub async fn bulk_upsert(pool: &SqlitePool, items: &[ContentUpsert]) -> Vec<BulkItemResult> {
    let mut results = Vec::with_capacity(items.len());
    for item in items {
        match upsert(pool, item).await {
            Ok(content) => results.push(BulkItemResult::Ok { content }),
            Err(e) => {
                warn!("Bulk content upsert failed for key {}: {e}", item.key);
                results.push(BulkItemResult::Error {
                    key: item.key.clone(),
                    error: "Failed to save content".to_string(),
                });
            }
        }
    }
    info!("Bulk content update: {} item(s)", items.len());
    results
}

/// Updates an existing key; fails with `NotFound` rather than creating it.
pub async fn update(
    pool: &SqlitePool,
    key: &str,
    patch: ContentPatch,
) -> Result<SiteContent, AppError> {
    sqlx::query_as(
        r#"
        UPDATE site_content
        SET value = COALESCE(?, value), type = COALESCE(?, type), updated_at = ?
        WHERE key = ?
        RETURNING *
        "#,
    )
    .bind(patch.value)
    .bind(patch.kind)
    .bind(Utc::now())
    .bind(key)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::not_found(LABEL))
}

pub async fn delete(pool: &SqlitePool, key: &str) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM site_content WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::not_found(LABEL));
    }
    Ok(())
}
