use serde::{Deserialize, Serialize};

use super::lenient::default_on_invalid;
use crate::domain::value_objects::{ContentHash, Rarity};

/// Per-picture metadata as stored under `images.<path>`.
///
/// A field holding an invalid value loads as its default; the other fields
/// of the record are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(default, deserialize_with = "default_on_invalid")]
    rarity: Rarity,
    #[serde(default, deserialize_with = "default_on_invalid")]
    blacklisted: bool,
    #[serde(
        default,
        rename = "sha256",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "default_on_invalid"
    )]
    content_hash: Option<ContentHash>,
}

/// Field-wise patch; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordUpdate {
    pub rarity: Option<Rarity>,
    pub blacklisted: Option<bool>,
    pub content_hash: Option<ContentHash>,
}

impl ImageRecord {
    /// Reconstruct from storage
    pub fn reconstruct(rarity: Rarity, blacklisted: bool, content_hash: Option<ContentHash>) -> Self {
        Self {
            rarity,
            blacklisted,
            content_hash,
        }
    }

    pub fn apply(&mut self, update: &RecordUpdate) {
        if let Some(rarity) = update.rarity {
            self.rarity = rarity;
        }
        if let Some(blacklisted) = update.blacklisted {
            self.blacklisted = blacklisted;
        }
        if let Some(hash) = &update.content_hash {
            self.content_hash = Some(hash.clone());
        }
    }

    // Getters
    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    pub fn is_blacklisted(&self) -> bool {
        self.blacklisted
    }

    pub fn content_hash(&self) -> Option<&ContentHash> {
        self.content_hash.as_ref()
    }
}

impl RecordUpdate {
    pub fn is_empty(&self) -> bool {
        self.rarity.is_none() && self.blacklisted.is_none() && self.content_hash.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_record() {
        let record = ImageRecord::default();
        assert_eq!(record.rarity(), Rarity::Common);
        assert!(!record.is_blacklisted());
        assert!(record.content_hash().is_none());
    }

    #[test]
    fn test_apply_only_touches_supplied_fields() {
        let mut record = ImageRecord::reconstruct(Rarity::Rare, true, None);
        record.apply(&RecordUpdate {
            blacklisted: Some(false),
            ..Default::default()
        });

        assert_eq!(record.rarity(), Rarity::Rare);
        assert!(!record.is_blacklisted());
    }

    #[test]
    fn test_serialized_shape() {
        let plain = serde_json::to_value(ImageRecord::default()).unwrap();
        assert_eq!(
            plain,
            serde_json::json!({"rarity": "Common", "blacklisted": false})
        );

        let hash = ContentHash::from_str(&"d".repeat(64)).unwrap();
        let hashed = ImageRecord::reconstruct(Rarity::Mythical, false, Some(hash));
        let value = serde_json::to_value(hashed).unwrap();
        assert_eq!(value["sha256"], "d".repeat(64));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let record: ImageRecord = serde_json::from_str(r#"{"rarity": "Uncommon"}"#).unwrap();
        assert_eq!(record.rarity(), Rarity::Uncommon);
        assert!(!record.is_blacklisted());
    }
}
