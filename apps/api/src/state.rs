use sqlx::SqlitePool;

use crate::assets::ResumeStore;
use crate::auth::TokenKeys;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
    /// Signing and verification keys for admin bearer tokens.
    pub tokens: TokenKeys,
    pub resumes: ResumeStore,
}

impl AppState {
    pub fn new(db: SqlitePool, config: Config) -> Self {
        let tokens = TokenKeys::new(&config.jwt_secret, config.jwt_ttl);
        let resumes = ResumeStore::new(config.upload_dir.clone());
        Self {
            db,
            config,
            tokens,
            resumes,
        }
    }
}
