use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::admin::AdminAccount;

pub async fn find_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<AdminAccount>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM admin_accounts WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<AdminAccount>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM admin_accounts WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert(
    pool: &SqlitePool,
    email: &str,
    name: &str,
    password_hash: &str,
) -> Result<AdminAccount, sqlx::Error> {
    let now = Utc::now();
    let account = AdminAccount {
        id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        name: name.to_string(),
        password_hash: password_hash.to_string(),
        created_at: now,
        updated_at: now,
    };

    sqlx::query(
        r#"
        INSERT INTO admin_accounts (id, email, name, password_hash, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&account.id)
    .bind(&account.email)
    .bind(&account.name)
    .bind(&account.password_hash)
    .bind(account.created_at)
    .bind(account.updated_at)
    .execute(pool)
    .await?;

    Ok(account)
}

/// Returns `false` when no account has this id.
pub async fn set_password_hash(
    pool: &SqlitePool,
    id: &str,
    password_hash: &str,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("UPDATE admin_accounts SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(id)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() > 0)
}
