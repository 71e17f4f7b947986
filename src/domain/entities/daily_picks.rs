use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::lenient::skip_invalid_entries;
use crate::domain::value_objects::{DateKey, ImagePath};

/// The daily pick document: one chosen picture per UTC day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyPicks(#[serde(deserialize_with = "skip_invalid_entries")] BTreeMap<DateKey, String>);

impl DailyPicks {
    pub fn get(&self, day: DateKey) -> Option<ImagePath> {
        self.0.get(&day).map(|p| ImagePath::from_key(p))
    }

    /// Record (or overwrite) the pick for a day
    pub fn record(&mut self, day: DateKey, path: &ImagePath) {
        self.0.insert(day, path.as_key());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_record_overwrites_same_day() {
        let day = DateKey::from_str("2024-01-01").unwrap();
        let mut picks = DailyPicks::default();

        picks.record(day, &ImagePath::from_key("/p/a.jpg"));
        picks.record(day, &ImagePath::from_key("/p/b.jpg"));

        assert_eq!(picks.len(), 1);
        assert_eq!(picks.get(day), Some(ImagePath::from_key("/p/b.jpg")));
    }

    #[test]
    fn test_document_shape() {
        let picks: DailyPicks =
            serde_json::from_str(r#"{"2024-01-01": "/p/a.jpg", "2024-01-02": "/p/b.jpg"}"#).unwrap();

        let day = DateKey::from_str("2024-01-02").unwrap();
        assert_eq!(picks.get(day).unwrap().file_name(), "b.jpg");
        assert_eq!(
            serde_json::to_value(&picks).unwrap(),
            serde_json::json!({"2024-01-01": "/p/a.jpg", "2024-01-02": "/p/b.jpg"})
        );
    }

    #[test]
    fn test_invalid_entries_are_dropped_on_load() {
        let picks: DailyPicks = serde_json::from_value(serde_json::json!({
            "2024-01-01": "/p/a.jpg",
            "yesterday": "/p/b.jpg",
            "2024-01-02": 42
        }))
        .unwrap();

        assert_eq!(picks.len(), 1);
        let day = DateKey::from_str("2024-01-01").unwrap();
        assert_eq!(picks.get(day), Some(ImagePath::from_key("/p/a.jpg")));
    }
}
