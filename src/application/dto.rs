use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::ImageRecord,
    value_objects::{DateKey, ImagePath, Rarity},
};

/// Metadata patch as received from the command layer.
///
/// Values are raw strings so that validation happens in one place,
/// before anything is written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetaUpdate {
    pub rarity: Option<String>,
    pub blacklisted: Option<bool>,
    pub content_hash: Option<String>,
}

/// Picture view handed back to the command layer for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PictureDto {
    pub path: ImagePath,
    pub name: String,
    pub rarity: Rarity,
    pub blacklisted: bool,
    pub content_hash: Option<String>,
}

impl PictureDto {
    pub fn new(path: ImagePath, record: &ImageRecord) -> Self {
        Self {
            name: path.file_name(),
            path,
            rarity: record.rarity(),
            blacklisted: record.is_blacklisted(),
            content_hash: record.content_hash().map(|h| h.to_string()),
        }
    }
}

/// Response for the daily picture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPicture {
    pub date: DateKey,
    pub picture: PictureDto,
}

/// Response for a random pull
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomPull {
    pub picture: PictureDto,
    pub remaining: u64,
    pub max_per_day: u64,
}

/// DTO for upload request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub rarity: Option<String>,
}

/// Result of an upload attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum UploadOutcome {
    /// New file written and registered
    Stored(PictureDto),
    /// Identical content already present; nothing written
    Duplicate { existing: ImagePath },
}
