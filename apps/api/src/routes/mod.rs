pub mod assets;
pub mod auth;
pub mod catalog;
pub mod contact;
pub mod content;
pub mod crud;
pub mod health;
pub mod json;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::assets::PUBLIC_PREFIX;
use crate::config::Config;
use crate::models::social::SocialLink;
use crate::models::timeline::{Education, Experience};
use crate::routes::crud::resource_routes;
use crate::state::AppState;

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_handler))
        .nest("/auth", auth::auth_routes())
        .nest("/projects", catalog::project_routes())
        .nest("/skills", catalog::skill_routes())
        .nest("/experience", resource_routes::<Experience>())
        .nest("/education", resource_routes::<Education>())
        .nest("/social", resource_routes::<SocialLink>())
        .nest("/content", content::content_routes())
        .nest("/contact", contact::contact_routes())
        .nest("/assets", assets::asset_routes())
}

/// Full application: JSON API under `/api`, uploaded files under `/uploads`, and in
/// production the built client with an `index.html` fallback for client-side routes.
pub fn build_router(state: AppState) -> Result<Router> {
    let config = &state.config;

    let csp = HeaderValue::from_str(&config.content_security_policy())
        .context("FRONTEND_URL is not valid in a Content-Security-Policy header")?;
    let cors = cors_layer(config)?;

    let mut router = Router::new()
        .nest("/api", api_routes())
        .nest_service(PUBLIC_PREFIX, ServeDir::new(&config.upload_dir));

    if config.is_production() {
        let dist = &config.client_dist_dir;
        info!("Serving client application from {}", dist.display());
        router = router.fallback_service(
            ServeDir::new(dist).fallback(ServeFile::new(dist.join("index.html"))),
        );
    }

    Ok(router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp,
        )))
}

fn cors_layer(config: &Config) -> Result<CorsLayer> {
    let origins = config
        .allowed_origins()
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("invalid CORS origin '{origin}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}
