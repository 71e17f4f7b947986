use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::errors::DomainError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// UTC calendar day, rendered as `YYYY-MM-DD`.
///
/// Ordering is chronological, which for four-digit years matches the
/// lexicographic order of the rendered key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Day containing the given instant
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self(instant.date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The following calendar day
    pub fn succ(&self) -> Self {
        Self(self.0.succ_opt().unwrap_or(self.0))
    }
}

impl std::fmt::Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl std::str::FromStr for DateKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Self)
            .map_err(|_| DomainError::InvalidDateKey(s.to_string()))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    #[test]
    fn test_date_key_display() {
        let key = DateKey::new(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(key.to_string(), "2024-01-05");
    }

    #[test]
    fn test_date_key_from_datetime_uses_utc_day() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 59).unwrap();
        assert_eq!(DateKey::from_datetime(instant).to_string(), "2024-03-09");
    }

    #[test]
    fn test_date_key_from_str_invalid() {
        assert!(DateKey::from_str("2024-13-01").is_err());
        assert!(DateKey::from_str("yesterday").is_err());
    }

    #[test]
    fn test_date_key_succ_crosses_month() {
        let key = DateKey::from_str("2024-02-29").unwrap();
        assert_eq!(key.succ().to_string(), "2024-03-01");
    }

    #[test]
    fn test_date_key_as_json_map_key() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(DateKey::from_str("2024-01-02").unwrap(), 1);
        map.insert(DateKey::from_str("2023-12-31").unwrap(), 2);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"2023-12-31":2,"2024-01-02":1}"#);

        let back: std::collections::BTreeMap<DateKey, i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
