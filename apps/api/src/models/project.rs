use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::models::fields::nullable;
use crate::store::{Resource, SqliteQuery};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub project_url: Option<String>,
    pub live_demo_url: Option<String>,
    pub github_url: Option<String>,
    pub tags: Json<Vec<String>>,
    pub featured: bool,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub project_url: Option<String>,
    pub live_demo_url: Option<String>,
    pub github_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub project_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub live_demo_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub github_url: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub order: Option<i32>,
}

impl Resource for Project {
    const TABLE: &'static str = "projects";
    const LABEL: &'static str = "Project";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "image_url",
        "project_url",
        "live_demo_url",
        "github_url",
        "tags",
        "featured",
        "order",
        "created_at",
        "updated_at",
    ];

    type Create = NewProject;
    type Patch = ProjectPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_create(id: String, input: NewProject, now: DateTime<Utc>) -> Self {
        Project {
            id,
            title: input.title,
            description: input.description,
            image_url: input.image_url,
            project_url: input.project_url,
            live_demo_url: input.live_demo_url,
            github_url: input.github_url,
            tags: Json(input.tags),
            featured: input.featured,
            order: input.order,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: ProjectPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(project_url) = patch.project_url {
            self.project_url = project_url;
        }
        if let Some(live_demo_url) = patch.live_demo_url {
            self.live_demo_url = live_demo_url;
        }
        if let Some(github_url) = patch.github_url {
            self.github_url = github_url;
        }
        if let Some(tags) = patch.tags {
            self.tags = Json(tags);
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.title.clone())
            .bind(self.description.clone())
            .bind(self.image_url.clone())
            .bind(self.project_url.clone())
            .bind(self.live_demo_url.clone())
            .bind(self.github_url.clone())
            .bind(self.tags.clone())
            .bind(self.featured)
            .bind(self.order)
            .bind(self.created_at)
            .bind(self.updated_at)
    }
}
