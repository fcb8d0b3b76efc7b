use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Duration;

const DEV_ORIGINS: &[&str] = &["http://localhost:3000", "http://localhost:5173"];

/// Deployment mode selected by `NODE_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

/// Optional bootstrap admin account, created at startup when absent.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub frontend_url: String,
    pub jwt_secret: String,
    /// Validity window of issued admin tokens.
    pub jwt_ttl: Duration,
    pub port: u16,
    pub environment: Environment,
    pub upload_dir: PathBuf,
    pub client_dist_dir: PathBuf,
    pub admin_seed: Option<AdminSeed>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let environment = match std::env::var("NODE_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        };

        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if environment == Environment::Production => {
                bail!("Required environment variable 'JWT_SECRET' is not set")
            }
            _ => "secret".to_string(),
        };

        let admin_seed = match (
            std::env::var("ADMIN_EMAIL").ok(),
            std::env::var("ADMIN_PASSWORD").ok(),
        ) {
            (Some(email), Some(password)) => Some(AdminSeed {
                email,
                password,
                name: std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Admin".to_string()),
            }),
            _ => None,
        };

        Ok(Config {
            database_url: env_or("DATABASE_URL", "sqlite://portfolio.db"),
            frontend_url: env_or("FRONTEND_URL", "http://localhost:3000"),
            jwt_secret,
            jwt_ttl: parse_ttl_hours(&env_or("JWT_TTL_HOURS", "168"))?,
            port: env_or("PORT", "5000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            environment,
            upload_dir: PathBuf::from(env_or("UPLOAD_DIR", "uploads")),
            client_dist_dir: PathBuf::from(env_or("CLIENT_DIST_DIR", "dist")),
            admin_seed,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Origins the CORS layer accepts.
    pub fn allowed_origins(&self) -> Vec<String> {
        if self.is_production() {
            vec![self.frontend_url.clone()]
        } else {
            DEV_ORIGINS.iter().map(|s| s.to_string()).collect()
        }
    }

    /// Value of the `Content-Security-Policy` header attached to every response.
    pub fn content_security_policy(&self) -> String {
        format!(
            "default-src 'self'; script-src 'self' 'unsafe-inline' 'unsafe-eval'; \
             style-src 'self' 'unsafe-inline' https://fonts.googleapis.com; \
             font-src 'self' https://fonts.gstatic.com; img-src 'self' data: https:; \
             connect-src 'self' {}",
            self.frontend_url
        )
    }
}

/// Token lifetime in whole hours; must be positive and representable.
fn parse_ttl_hours(raw: &str) -> Result<Duration> {
    let hours = raw
        .parse::<i64>()
        .context("JWT_TTL_HOURS must be a whole number of hours")?;
    if hours <= 0 {
        bail!("JWT_TTL_HOURS must be positive, got {hours}");
    }
    Duration::try_hours(hours).context("JWT_TTL_HOURS out of range")
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
impl Config {
    pub fn for_tests(upload_dir: PathBuf) -> Self {
        Config {
            database_url: "sqlite::memory:".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_ttl: Duration::hours(168),
            port: 0,
            environment: Environment::Development,
            upload_dir: upload_dir.clone(),
            client_dist_dir: upload_dir,
            admin_seed: None,
            rust_log: "debug".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_origins_ignore_frontend_url() {
        let mut config = Config::for_tests(PathBuf::from("uploads"));
        config.frontend_url = "https://me.example.com".to_string();
        assert_eq!(
            config.allowed_origins(),
            vec!["http://localhost:3000", "http://localhost:5173"]
        );
    }

    #[test]
    fn test_production_origin_is_frontend_url() {
        let mut config = Config::for_tests(PathBuf::from("uploads"));
        config.environment = Environment::Production;
        config.frontend_url = "https://me.example.com".to_string();
        assert_eq!(config.allowed_origins(), vec!["https://me.example.com"]);
    }

    #[test]
    fn test_ttl_hours_parsed() {
        assert_eq!(parse_ttl_hours("168").unwrap(), Duration::days(7));
        assert!(parse_ttl_hours("a week").is_err());
    }

    #[test]
    fn test_non_positive_ttl_is_rejected() {
        for raw in ["0", "-5"] {
            let err = parse_ttl_hours(raw).unwrap_err();
            assert!(err.to_string().contains("positive"), "{raw}: {err}");
        }
    }

    #[test]
    fn test_oversized_ttl_is_an_error_not_a_panic() {
        let err = parse_ttl_hours("9000000000000000").unwrap_err();
        assert_eq!(err.to_string(), "JWT_TTL_HOURS out of range");
    }

    #[test]
    fn test_csp_includes_frontend_origin() {
        let mut config = Config::for_tests(PathBuf::from("uploads"));
        config.frontend_url = "https://me.example.com".to_string();
        let csp = config.content_security_policy();
        assert!(csp.starts_with("default-src 'self';"));
        assert!(csp.ends_with("connect-src 'self' https://me.example.com"));
    }
}
