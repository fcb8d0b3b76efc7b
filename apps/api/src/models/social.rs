use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::fields::nullable;
use crate::store::{Resource, SqliteQuery};

/// A profile link. The client looks links up by `platform`, which is not unique.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub id: String,
    pub platform: String,
    pub url: String,
    pub icon: Option<String>,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct NewSocialLink {
    pub platform: String,
    pub url: String,
    pub icon: Option<String>,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct SocialLinkPatch {
    pub platform: Option<String>,
    pub url: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub icon: Option<Option<String>>,
    pub order: Option<i32>,
}

impl Resource for SocialLink {
    const TABLE: &'static str = "social_links";
    const LABEL: &'static str = "Social link";
    const COLUMNS: &'static [&'static str] =
        &["platform", "url", "icon", "order", "created_at", "updated_at"];

    type Create = NewSocialLink;
    type Patch = SocialLinkPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_create(id: String, input: NewSocialLink, now: DateTime<Utc>) -> Self {
        SocialLink {
            id,
            platform: input.platform,
            url: input.url,
            icon: input.icon,
            order: input.order,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: SocialLinkPatch) {
        if let Some(platform) = patch.platform {
            self.platform = platform;
        }
        if let Some(url) = patch.url {
            self.url = url;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
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
            .bind(self.platform.clone())
            .bind(self.url.clone())
            .bind(self.icon.clone())
            .bind(self.order)
            .bind(self.created_at)
            .bind(self.updated_at)
    }
}
