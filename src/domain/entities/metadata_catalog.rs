use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::image_record::{ImageRecord, RecordUpdate};
use super::lenient::skip_invalid_entries;
use crate::domain::value_objects::{ContentHash, ImagePath};

/// Outcome of a get-or-create lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaLookup {
    Existing(ImageRecord),
    Created(ImageRecord),
}

impl MetaLookup {
    pub fn record(&self) -> &ImageRecord {
        match self {
            MetaLookup::Existing(r) | MetaLookup::Created(r) => r,
        }
    }

    pub fn into_record(self) -> ImageRecord {
        match self {
            MetaLookup::Existing(r) | MetaLookup::Created(r) => r,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, MetaLookup::Created(_))
    }
}

/// The metadata document: records by path plus the content-hash reverse index.
///
/// The reverse index is advisory. Registering a hash that is already taken
/// simply repoints it at the newer path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataCatalog {
    #[serde(default, deserialize_with = "skip_invalid_entries")]
    images: BTreeMap<String, ImageRecord>,
    #[serde(default, deserialize_with = "skip_invalid_entries")]
    hashes: BTreeMap<String, String>,
}

impl MetadataCatalog {
    pub fn get(&self, path: &ImagePath) -> Option<&ImageRecord> {
        self.images.get(&path.as_key())
    }

    /// Look up a record, inserting the default one when absent
    pub fn get_or_insert(&mut self, path: &ImagePath) -> MetaLookup {
        let key = path.as_key();
        match self.images.get(&key) {
            Some(record) => MetaLookup::Existing(record.clone()),
            None => {
                let record = ImageRecord::default();
                self.images.insert(key, record.clone());
                MetaLookup::Created(record)
            }
        }
    }

    /// Patch a record (creating it first if needed) and index its hash
    pub fn apply(&mut self, path: &ImagePath, update: &RecordUpdate) -> ImageRecord {
        let key = path.as_key();
        let record = self.images.entry(key.clone()).or_default();
        record.apply(update);
        let updated = record.clone();

        if let Some(hash) = &update.content_hash {
            self.hashes.insert(hash.as_hex().to_string(), key);
        }

        updated
    }

    pub fn find_by_hash(&self, hash: &ContentHash) -> Option<ImagePath> {
        self.hashes.get(hash.as_hex()).map(|p| ImagePath::from_key(p))
    }

    /// Missing records count as not blacklisted
    pub fn is_blacklisted(&self, path: &ImagePath) -> bool {
        self.get(path).is_some_and(ImageRecord::is_blacklisted)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn hash_count(&self) -> usize {
        self.hashes.len()
    }
}
