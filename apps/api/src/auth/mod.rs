//! Admin authentication: credential checks, bearer tokens and password changes.

pub mod extract;
pub mod password;
pub mod token;

use sqlx::SqlitePool;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::admin::{AdminProfile, LoginResponse};
use crate::store::admin;

pub use extract::AuthAdmin;
pub use token::TokenKeys;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

static DUMMY_HASH: OnceCell<String> = OnceCell::const_new();

/// Hash checked when the email matches no account. Computed once per process.
async fn dummy_hash() -> Result<&'static str, AppError> {
    DUMMY_HASH
        .get_or_try_init(|| password::hash_password("no-such-admin".to_string()))
        .await
        .map(String::as_str)
}

/// Checks credentials and issues a token for the matching account.
/// An unknown email and a wrong password fail identically.
pub async fn login(
    pool: &SqlitePool,
    tokens: &TokenKeys,
    email: &str,
    password: &str,
) -> Result<LoginResponse, AppError> {
    let Some(account) = admin::find_by_email(pool, email).await? else {
        // unknown emails pay the same Argon2 cost as a wrong password
        password::verify_password(password.to_string(), dummy_hash().await?.to_string()).await?;
        warn!("Login attempt for unknown account");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    if !password::verify_password(password.to_string(), account.password_hash.clone()).await? {
        warn!("Login attempt with wrong password for {}", account.email);
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let token = tokens.issue(&account.id)?;
    info!("Admin {} logged in", account.email);
    Ok(LoginResponse {
        token,
        admin: account.into(),
    })
}

pub async fn current_admin(pool: &SqlitePool, account_id: &str) -> Result<AdminProfile, AppError> {
    admin::find_by_id(pool, account_id)
        .await?
        .map(AdminProfile::from)
        .ok_or_else(|| AppError::not_found("Admin"))
}

pub async fn change_password(
    pool: &SqlitePool,
    account_id: &str,
    current_password: &str,
    new_password: &str,
) -> Result<(), AppError> {
    let account = admin::find_by_id(pool, account_id)
        .await?
        .ok_or_else(|| AppError::not_found("Admin"))?;

    if !password::verify_password(current_password.to_string(), account.password_hash).await? {
        return Err(AppError::Unauthorized(
            "Current password is incorrect".to_string(),
        ));
    }

    let new_hash = password::hash_password(new_password.to_string()).await?;
    if !admin::set_password_hash(pool, account_id, &new_hash).await? {
        return Err(AppError::not_found("Admin"));
    }
    info!("Admin {} changed password", account.email);
    Ok(())
}
