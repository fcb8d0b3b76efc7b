use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::contact::{ContactMessage, NewContactMessage};

const LABEL: &str = "Message";

pub async fn create(
    pool: &SqlitePool,
    input: NewContactMessage,
) -> Result<ContactMessage, sqlx::Error> {
    let now = Utc::now();
    let message = ContactMessage {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        email: input.email,
        subject: input.subject,
        message: input.message,
        read: false,
        created_at: now,
        updated_at: now,
    };

    sqlx::query(
        r#"
        INSERT INTO contact_messages
            (id, name, email, subject, message, read, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&message.id)
    .bind(&message.name)
    .bind(&message.email)
    .bind(&message.subject)
    .bind(&message.message)
    .bind(message.read)
    .bind(message.created_at)
    .bind(message.updated_at)
    .execute(pool)
    .await?;

    Ok(message)
}

/// Newest first.
pub async fn list(pool: &SqlitePool) -> Result<Vec<ContactMessage>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM contact_messages ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn get(pool: &SqlitePool, id: &str) -> Result<ContactMessage, AppError> {
    sqlx::query_as("SELECT * FROM contact_messages WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found(LABEL))
}

pub async fn mark_read(pool: &SqlitePool, id: &str) -> Result<ContactMessage, AppError> {
    let result = sqlx::query("UPDATE contact_messages SET read = 1, updated_at = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::not_found(LABEL));
    }
    get(pool, id).await
}

pub async fn delete(pool: &SqlitePool, id: &str) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM contact_messages WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::not_found(LABEL));
    }
    Ok(())
}

pub async fn count_unread(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages WHERE read = 0")
        .fetch_one(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    fn submission(name: &str) -> NewContactMessage {
        NewContactMessage {
            name: name.to_string(),
            email: format!("{}@x.com", name.to_lowercase()),
            subject: None,
            message: "hi".to_string(),
        }
    }

    #[tokio::test]
    async fn test_new_messages_are_unread() {
        let pool = memory_pool().await;
        let m = create(&pool, submission("A")).await.unwrap();
        assert!(!m.read);
        assert_eq!(count_unread(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_mark_read_decrements_unread() {
        let pool = memory_pool().await;
        let a = create(&pool, submission("A")).await.unwrap();
        create(&pool, submission("B")).await.unwrap();
        assert_eq!(count_unread(&pool).await.unwrap(), 2);

        let read = mark_read(&pool, &a.id).await.unwrap();
        assert!(read.read);
        assert_eq!(count_unread(&pool).await.unwrap(), 1);

        // marking twice is harmless
        mark_read(&pool, &a.id).await.unwrap();
        assert_eq!(count_unread(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let pool = memory_pool().await;
        create(&pool, submission("First")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        create(&pool, submission("Second")).await.unwrap();

        let names: Vec<String> = list(&pool).await.unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn test_missing_message_is_not_found() {
        let pool = memory_pool().await;
        assert!(matches!(get(&pool, "nope").await, Err(AppError::NotFound(_))));
        assert!(matches!(mark_read(&pool, "nope").await, Err(AppError::NotFound(_))));
        assert!(matches!(delete(&pool, "nope").await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let pool = memory_pool().await;
        let m = create(&pool, submission("A")).await.unwrap();
        delete(&pool, &m.id).await.unwrap();
        assert!(matches!(delete(&pool, &m.id).await, Err(AppError::NotFound(_))));
        assert!(list(&pool).await.unwrap().is_empty());
    }
}
