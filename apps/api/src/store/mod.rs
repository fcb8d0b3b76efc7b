pub mod admin;
pub mod contact;
pub mod content;

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Encode, FromRow, Sqlite, SqlitePool, Type};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// A record kept in its own table, keyed by a generated id and displayed by its
/// manual `order` column.
///
/// Implementors describe their writable columns once; [`Repository`] derives the
/// list/get/create/update/delete SQL from that description.
pub trait Resource:
    for<'r> FromRow<'r, SqliteRow> + Serialize + Send + Sync + Unpin + 'static
{
    const TABLE: &'static str;
    /// Human-readable name used in responses, e.g. "Project".
    const LABEL: &'static str;
    /// Every column except `id`, in the order [`Resource::bind_columns`] binds them.
    const COLUMNS: &'static [&'static str];

    type Create: DeserializeOwned + Send + 'static;
    type Patch: DeserializeOwned + Send + 'static;

    fn id(&self) -> &str;

    /// Builds a new row from the create payload, applying field defaults.
    fn from_create(id: String, input: Self::Create, now: DateTime<Utc>) -> Self;

    /// Merges a partial update. Fields absent from the patch keep their value.
    fn apply(&mut self, patch: Self::Patch);

    fn touch(&mut self, now: DateTime<Utc>);

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;
}

/// Generic CRUD over one [`Resource`] table.
pub struct Repository<T> {
    pool: SqlitePool,
    _marker: PhantomData<T>,
}

impl<T: Resource> Repository<T> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    /// All rows, ascending by `order` (ties by creation time).
    pub async fn list(&self) -> Result<Vec<T>, sqlx::Error> {
        let sql = format!(
            "SELECT * FROM {} ORDER BY \"order\" ASC, created_at ASC",
            T::TABLE
        );
        sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await
    }

    /// Rows whose `column` equals `value`, in display order.
    /// `column` must be a trusted identifier, never user input.
    pub async fn list_where<V>(&self, column: &'static str, value: V) -> Result<Vec<T>, sqlx::Error>
    where
        V: 'static + Send + Type<Sqlite> + for<'q> Encode<'q, Sqlite>,
    {
        let sql = format!(
            "SELECT * FROM {} WHERE \"{column}\" = ? ORDER BY \"order\" ASC, created_at ASC",
            T::TABLE
        );
        sqlx::query_as::<_, T>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find(&self, id: &str) -> Result<Option<T>, sqlx::Error> {
        let sql = format!("SELECT * FROM {} WHERE id = ?", T::TABLE);
        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn get(&self, id: &str) -> Result<T, AppError> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::not_found(T::LABEL))
    }

    pub async fn create(&self, input: T::Create) -> Result<T, AppError> {
        let row = T::from_create(Uuid::new_v4().to_string(), input, Utc::now());

        let placeholders = vec!["?"; T::COLUMNS.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} (id, {}) VALUES (?, {placeholders})",
            T::TABLE,
            quoted_columns::<T>(),
        );
        let query = sqlx::query(&sql).bind(row.id().to_string());
        row.bind_columns(query).execute(&self.pool).await?;

        info!("Created {} {}", T::LABEL, row.id());
        Ok(row)
    }

    /// Read-merge-write. Concurrent updates to one row are last-write-wins.
    pub async fn update(&self, id: &str, patch: T::Patch) -> Result<T, AppError> {
        let mut row = self.get(id).await?;
        row.apply(patch);
        row.touch(Utc::now());

        let assignments = T::COLUMNS
            .iter()
            .map(|c| format!("\"{c}\" = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {} SET {assignments} WHERE id = ?", T::TABLE);
        let query = row.bind_columns(sqlx::query(&sql)).bind(id.to_string());
        let result = query.execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            // deleted between the read and the write
            return Err(AppError::not_found(T::LABEL));
        }

        info!("Updated {} {id}", T::LABEL);
        Ok(row)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", T::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(T::LABEL));
        }

        info!("Deleted {} {id}", T::LABEL);
        Ok(())
    }
}

fn quoted_columns<T: Resource>() -> String {
    T::COLUMNS
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;
    use crate::models::project::{NewProject, Project, ProjectPatch};
    use crate::models::skill::{NewSkill, Skill};
    use crate::models::social::{NewSocialLink, SocialLink, SocialLinkPatch};
    use crate::models::timeline::{Education, EducationPatch, NewEducation};
    use serde_json::json;

    fn new_project(title: &str, order: i32, featured: bool) -> NewProject {
        NewProject {
            title: title.to_string(),
            description: format!("{title} description"),
            image_url: format!("/img/{title}.png"),
            project_url: None,
            live_demo_url: Some("https://demo.example.com".to_string()),
            github_url: None,
            tags: vec!["rust".to_string(), "rust".to_string()],
            featured,
            order,
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let repo = Repository::<Project>::new(memory_pool().await);
        let created = repo.create(new_project("folio", 3, true)).await.unwrap();
        let fetched = repo.get(&created.id).await.unwrap();

        assert_eq!(fetched.title, "folio");
        assert_eq!(fetched.tags.0, vec!["rust", "rust"]);
        assert_eq!(fetched.live_demo_url.as_deref(), Some("https://demo.example.com"));
        assert!(fetched.featured);
        assert_eq!(fetched.order, 3);
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_order() {
        let repo = Repository::<Project>::new(memory_pool().await);
        for (title, order) in [("c", 2), ("a", 0), ("b", 1), ("d", 2)] {
            repo.create(new_project(title, order, false)).await.unwrap();
        }
        let orders: Vec<i32> = repo.list().await.unwrap().iter().map(|p| p.order).collect();
        assert_eq!(orders, vec![0, 1, 2, 2]);
    }

    #[tokio::test]
    async fn test_list_where_filters_featured() {
        let repo = Repository::<Project>::new(memory_pool().await);
        repo.create(new_project("plain", 0, false)).await.unwrap();
        repo.create(new_project("star", 1, true)).await.unwrap();

        let featured = repo.list_where("featured", true).await.unwrap();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].title, "star");
    }

    #[tokio::test]
    async fn test_list_where_matches_category_exactly() {
        let repo = Repository::<Skill>::new(memory_pool().await);
        for (name, category) in [("Rust", "Languages"), ("Axum", "Frameworks"), ("Go", "languages")] {
            let input = NewSkill {
                name: name.to_string(),
                icon: name.to_lowercase(),
                category: category.to_string(),
                level: 80,
                order: 0,
            };
            repo.create(input).await.unwrap();
        }
        let langs = repo.list_where("category", "Languages".to_string()).await.unwrap();
        assert_eq!(langs.len(), 1);
        assert_eq!(langs[0].name, "Rust");
    }

    #[tokio::test]
    async fn test_update_changes_only_patched_fields() {
        let repo = Repository::<Project>::new(memory_pool().await);
        let created = repo.create(new_project("folio", 0, false)).await.unwrap();

        let patch = ProjectPatch {
            order: Some(9),
            ..Default::default()
        };
        let updated = repo.update(&created.id, patch).await.unwrap();
        let stored = repo.get(&created.id).await.unwrap();

        assert_eq!(updated, stored);
        assert_eq!(stored.order, 9);
        assert_eq!(stored.title, created.title);
        assert_eq!(stored.description, created.description);
        assert_eq!(stored.live_demo_url, created.live_demo_url);
        assert_eq!(stored.tags, created.tags);
        assert_eq!(stored.created_at, created.created_at);
        assert!(stored.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let repo = Repository::<Project>::new(memory_pool().await);
        let err = repo.update("nope", ProjectPatch::default()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Project not found"));
    }

    #[tokio::test]
    async fn test_delete_is_permanent_and_not_repeatable() {
        let repo = Repository::<Project>::new(memory_pool().await);
        let keep = repo.create(new_project("keep", 0, false)).await.unwrap();
        let gone = repo.create(new_project("gone", 1, false)).await.unwrap();

        repo.delete(&gone.id).await.unwrap();
        assert!(matches!(repo.get(&gone.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(repo.delete(&gone.id).await, Err(AppError::NotFound(_))));

        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![keep.id]);
    }

    #[tokio::test]
    async fn test_social_link_round_trip() {
        let repo = Repository::<SocialLink>::new(memory_pool().await);
        let github = repo
            .create(NewSocialLink {
                platform: "github".to_string(),
                url: "https://github.com/me".to_string(),
                icon: Some("github".to_string()),
                order: 2,
            })
            .await
            .unwrap();
        let mail = repo
            .create(NewSocialLink {
                platform: "email".to_string(),
                url: "mailto:me@example.com".to_string(),
                icon: None,
                order: 1,
            })
            .await
            .unwrap();

        assert_eq!(repo.get(&github.id).await.unwrap(), github);

        let patch: SocialLinkPatch = serde_json::from_value(json!({ "icon": null })).unwrap();
        let updated = repo.update(&github.id, patch).await.unwrap();
        let stored = repo.get(&github.id).await.unwrap();
        assert_eq!(updated, stored);
        assert_eq!(stored.icon, None);
        assert_eq!(stored.platform, "github");
        assert_eq!(stored.url, "https://github.com/me");
        assert_eq!(stored.order, 2);

        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![mail.id.clone(), github.id.clone()]);

        repo.delete(&github.id).await.unwrap();
        let err = repo.delete(&github.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Social link not found"));
        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![mail.id]);
    }

    #[tokio::test]
    async fn test_education_round_trip() {
        let repo = Repository::<Education>::new(memory_pool().await);
        let bsc: NewEducation = serde_json::from_value(json!({
            "degree": "BSc",
            "institution": "Uni",
            "location": "Leeds",
            "startDate": "2015-09-01",
            "endDate": "2018-06-30",
            "description": "Computer science",
            "order": 1
        }))
        .unwrap();
        let msc: NewEducation = serde_json::from_value(json!({
            "degree": "MSc",
            "institution": "Uni",
            "startDate": "2018-09-01T00:00:00Z",
            "current": true,
            "description": "Distributed systems"
        }))
        .unwrap();
        let bsc = repo.create(bsc).await.unwrap();
        let msc = repo.create(msc).await.unwrap();

        let fetched = repo.get(&bsc.id).await.unwrap();
        assert_eq!(fetched, bsc);
        assert_eq!(fetched.location.as_deref(), Some("Leeds"));
        assert_eq!(fetched.start_date.to_rfc3339(), "2015-09-01T00:00:00+00:00");
        assert!(fetched.end_date.is_some());

        let patch: EducationPatch =
            serde_json::from_value(json!({ "endDate": null, "location": null })).unwrap();
        repo.update(&bsc.id, patch).await.unwrap();
        let stored = repo.get(&bsc.id).await.unwrap();
        assert_eq!(stored.end_date, None);
        assert_eq!(stored.location, None);
        assert_eq!(stored.degree, bsc.degree);
        assert_eq!(stored.institution, bsc.institution);
        assert_eq!(stored.start_date, bsc.start_date);
        assert_eq!(stored.description, bsc.description);
        assert_eq!(stored.order, 1);

        let degrees: Vec<String> = repo.list().await.unwrap().into_iter().map(|e| e.degree).collect();
        assert_eq!(degrees, vec!["MSc", "BSc"]);

        repo.delete(&msc.id).await.unwrap();
        assert!(matches!(repo.delete(&msc.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(repo.get(&msc.id).await, Err(AppError::NotFound(_))));
    }
}
