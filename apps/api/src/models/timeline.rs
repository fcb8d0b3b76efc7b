//! Experience and education entries rendered on the timeline.
//!
//! `endDate = null` marks an ongoing entry. `current` is a separate display flag;
//! the pairing `current = true` with a non-null `endDate` is allowed but unusual.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::fields::{date, nullable, nullable_date, optional_date};
use crate::store::{Resource, SqliteQuery};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub current: bool,
    pub description: String,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExperience {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    #[serde(deserialize_with = "date")]
    pub start_date: DateTime<Utc>,
    #[serde(default, deserialize_with = "optional_date")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current: bool,
    pub description: String,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperiencePatch {
    pub title: Option<String>,
    pub company: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "optional_date")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "nullable_date")]
    pub end_date: Option<Option<DateTime<Utc>>>,
    pub current: Option<bool>,
    pub description: Option<String>,
    pub order: Option<i32>,
}

impl Resource for Experience {
    const TABLE: &'static str = "experience";
    const LABEL: &'static str = "Experience";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "company",
        "location",
        "start_date",
        "end_date",
        "current",
        "description",
        "order",
        "created_at",
        "updated_at",
    ];

    type Create = NewExperience;
    type Patch = ExperiencePatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_create(id: String, input: NewExperience, now: DateTime<Utc>) -> Self {
        Experience {
            id,
            title: input.title,
            company: input.company,
            location: input.location,
            start_date: input.start_date,
            end_date: input.end_date,
            current: input.current,
            description: input.description,
            order: input.order,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: ExperiencePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(company) = patch.company {
            self.company = company;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(current) = patch.current {
            self.current = current;
        }
        if let Some(description) = patch.description {
            self.description = description;
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
            .bind(self.company.clone())
            .bind(self.location.clone())
            .bind(self.start_date)
            .bind(self.end_date)
            .bind(self.current)
            .bind(self.description.clone())
            .bind(self.order)
            .bind(self.created_at)
            .bind(self.updated_at)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub degree: String,
    pub institution: String,
    pub location: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub current: bool,
    pub description: String,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEducation {
    pub degree: String,
    pub institution: String,
    pub location: Option<String>,
    #[serde(deserialize_with = "date")]
    pub start_date: DateTime<Utc>,
    #[serde(default, deserialize_with = "optional_date")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current: bool,
    pub description: String,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationPatch {
    pub degree: Option<String>,
    pub institution: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "optional_date")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "nullable_date")]
    pub end_date: Option<Option<DateTime<Utc>>>,
    pub current: Option<bool>,
    pub description: Option<String>,
    pub order: Option<i32>,
}

impl Resource for Education {
    const TABLE: &'static str = "education";
    const LABEL: &'static str = "Education";
    const COLUMNS: &'static [&'static str] = &[
        "degree",
        "institution",
        "location",
        "start_date",
        "end_date",
        "current",
        "description",
        "order",
        "created_at",
        "updated_at",
    ];

    type Create = NewEducation;
    type Patch = EducationPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_create(id: String, input: NewEducation, now: DateTime<Utc>) -> Self {
        Education {
            id,
            degree: input.degree,
            institution: input.institution,
            location: input.location,
            start_date: input.start_date,
            end_date: input.end_date,
            current: input.current,
            description: input.description,
            order: input.order,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: EducationPatch) {
        if let Some(degree) = patch.degree {
            self.degree = degree;
        }
        if let Some(institution) = patch.institution {
            self.institution = institution;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(current) = patch.current {
            self.current = current;
        }
        if let Some(description) = patch.description {
            self.description = description;
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
            .bind(self.degree.clone())
            .bind(self.institution.clone())
            .bind(self.location.clone())
            .bind(self.start_date)
            .bind(self.end_date)
            .bind(self.current)
            .bind(self.description.clone())
            .bind(self.order)
            .bind(self.created_at)
            .bind(self.updated_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    fn experience() -> Experience {
        let input: NewExperience = serde_json::from_value(json!({
            "title": "Engineer",
            "company": "Acme",
            "startDate": "2020-02-01",
            "endDate": "2022-06-30",
            "description": "Built things"
        }))
        .unwrap();
        Experience::from_create("e1".into(), input, Utc::now())
    }

    #[test]
    fn test_empty_end_date_means_ongoing() {
        let input: NewEducation = serde_json::from_value(json!({
            "degree": "BSc",
            "institution": "Uni",
            "startDate": "2016-09-01T00:00:00Z",
            "endDate": "",
            "current": true,
            "description": "CS"
        }))
        .unwrap();
        assert!(input.end_date.is_none());
        assert!(input.current);
    }

    #[test]
    fn test_patch_can_clear_end_date() {
        let mut e = experience();
        let patch: ExperiencePatch =
            serde_json::from_value(json!({ "endDate": null, "current": true })).unwrap();
        e.apply(patch);
        assert!(e.end_date.is_none());
        assert!(e.current);
        assert_eq!(e.start_date.year(), 2020);
    }

    #[test]
    fn test_patch_without_end_date_keeps_it() {
        let mut e = experience();
        let patch: ExperiencePatch = serde_json::from_value(json!({ "title": "Lead" })).unwrap();
        e.apply(patch);
        assert_eq!(e.title, "Lead");
        assert_eq!(e.end_date.map(|d| d.month()), Some(6));
    }

    #[test]
    fn test_invalid_start_date_is_rejected() {
        let parsed = serde_json::from_value::<NewExperience>(json!({
            "title": "Engineer",
            "company": "Acme",
            "startDate": "soon",
            "description": "?"
        }));
        assert!(parsed.is_err());
    }
}
