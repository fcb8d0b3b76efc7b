//! Serde helpers shared by the request payloads.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer};

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
/// Use with `#[serde(default, deserialize_with = "nullable")]`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Parses an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {raw}")))
}

pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.is_empty() => parse_date(&raw)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid date: {raw}"))),
        _ => Ok(None),
    }
}

/// Tri-state date for updates: absent, explicit `null`, or a new value.
pub fn nullable_date<'de, D>(deserializer: D) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    optional_date(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "nullable")]
        location: Option<Option<String>>,
        #[serde(default, deserialize_with = "nullable_date")]
        end_date: Option<Option<DateTime<Utc>>>,
    }

    #[test]
    fn test_parse_plain_date_is_midnight_utc() {
        let d = parse_date("2021-09-01").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2021, 9, 1));
        assert_eq!(d.hour(), 0);
    }

    #[test]
    fn test_parse_rfc3339_converts_to_utc() {
        let d = parse_date("2021-09-01T10:00:00+02:00").unwrap();
        assert_eq!(d.hour(), 8);
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(parse_date("last summer").is_none());
    }

    #[test]
    fn test_absent_null_and_value_are_distinct() {
        let absent: Patch = serde_json::from_value(json!({})).unwrap();
        assert!(absent.location.is_none());
        assert!(absent.end_date.is_none());

        let cleared: Patch =
            serde_json::from_value(json!({ "location": null, "end_date": null })).unwrap();
        assert_eq!(cleared.location, Some(None));
        assert_eq!(cleared.end_date, Some(None));

        let set: Patch =
            serde_json::from_value(json!({ "location": "Berlin", "end_date": "2020-01-31" }))
                .unwrap();
        assert_eq!(set.location, Some(Some("Berlin".to_string())));
        assert_eq!(set.end_date.unwrap().unwrap().day(), 31);
    }
}
