//! Entry-by-entry deserialization for the stored documents.
//!
//! The documents are small hand-editable JSON files. One bad entry must not
//! make the whole document load as empty, because the next save would then
//! overwrite every good entry with nothing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;
use tracing::warn;

/// Parse a JSON object one entry at a time, dropping entries whose key or
/// value does not parse
pub fn skip_invalid_entries<'de, D, K, V>(deserializer: D) -> Result<BTreeMap<K, V>, D::Error>
where
    D: Deserializer<'de>,
    K: FromStr + Ord,
    K::Err: Display,
    V: DeserializeOwned,
{
    let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
    let mut entries = BTreeMap::new();

    for (key, value) in raw {
        let parsed_key = match key.parse::<K>() {
            Ok(k) => k,
            Err(e) => {
                warn!("Dropping stored entry with invalid key {:?}: {}", key, e);
                continue;
            }
        };
        match serde_json::from_value::<V>(value) {
            Ok(v) => {
                entries.insert(parsed_key, v);
            }
            Err(e) => warn!("Dropping stored entry {:?}: {}", key, e),
        }
    }

    Ok(entries)
}

/// Parse a single field, falling back to its default when the stored value is invalid
pub fn default_on_invalid<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    match serde_json::from_value(raw.clone()) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!("Replacing invalid stored value {} with the default: {}", raw, e);
            Ok(T::default())
        }
    }
}
