use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::store::{Resource, SqliteQuery};

const DEFAULT_LEVEL: i32 = 80;

/// A skill badge. `level` is a 0-100 proficiency hint and is not range-checked.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub category: String,
    pub level: i32,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_level() -> i32 {
    DEFAULT_LEVEL
}

#[derive(Debug, Deserialize)]
pub struct NewSkill {
    pub name: String,
    pub icon: String,
    pub category: String,
    #[serde(default = "default_level")]
    pub level: i32,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct SkillPatch {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub category: Option<String>,
    pub level: Option<i32>,
    pub order: Option<i32>,
}

impl Resource for Skill {
    const TABLE: &'static str = "skills";
    const LABEL: &'static str = "Skill";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "icon",
        "category",
        "level",
        "order",
        "created_at",
        "updated_at",
    ];

    type Create = NewSkill;
    type Patch = SkillPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_create(id: String, input: NewSkill, now: DateTime<Utc>) -> Self {
        Skill {
            id,
            name: input.name,
            icon: input.icon,
            category: input.category,
            level: input.level,
            order: input.order,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: SkillPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(level) = patch.level {
            self.level = level;
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
            .bind(self.name.clone())
            .bind(self.icon.clone())
            .bind(self.category.clone())
            .bind(self.level)
            .bind(self.order)
            .bind(self.created_at)
            .bind(self.updated_at)
    }
}
