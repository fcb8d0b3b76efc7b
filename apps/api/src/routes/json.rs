use axum::extract::FromRequest;

use crate::errors::AppError;

/// `axum::Json` whose rejections render as `{"error": ...}` 400s like every other
/// failure, instead of axum's plain-text bodies.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
