use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::path::PathBuf;

use crate::application::access::AccessPolicy;
use crate::application::use_cases::{
    DEFAULT_MAX_DAILY_RANDOM, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_RETENTION_DAYS,
};

static ID_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,\s]+").expect("Invalid id separator regex"));

#[derive(Debug, Clone)]
pub struct Config {
    pub images_dir: PathBuf,
    pub daily_db: PathBuf,
    pub images_db: PathBuf,
    pub usage_db: PathBuf,
    pub max_daily_random: u64,
    pub usage_retention_days: usize,
    pub max_upload_bytes: u64,
    pub admin_user_ids: HashSet<u64>,
    /// Admin commands are only accepted from this guild when set
    pub config_guild_id: Option<u64>,
    pub allowed_guild_ids: HashSet<u64>,
}

impl Config {
    pub fn from_env() -> Self {
        let mut allowed_guild_ids = parse_id_list(&std::env::var("GUILD_IDS").unwrap_or_default());
        allowed_guild_ids.extend(parse_id_list(
            &std::env::var("GUILD_ID").unwrap_or_default(),
        ));

        Self {
            images_dir: std::env::var("IMAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("images")),
            daily_db: std::env::var("DAILY_DB")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("daily.json")),
            images_db: std::env::var("IMAGES_DB")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("images_db.json")),
            usage_db: std::env::var("USAGE_DB")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("usage.json")),
            max_daily_random: std::env::var("MAX_DAILY_RANDOM")
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_MAX_DAILY_RANDOM),
            usage_retention_days: std::env::var("USAGE_RETENTION_DAYS")
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_RETENTION_DAYS),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            admin_user_ids: parse_id_list(&std::env::var("ADMIN_USER_IDS").unwrap_or_default()),
            // 0 is the historical "unset" value
            config_guild_id: std::env::var("CONFIG_GUILD_ID")
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .filter(|id| *id != 0),
            allowed_guild_ids,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.images_dir.as_os_str().is_empty() {
            return Err("IMAGES_DIR cannot be empty".to_string());
        }

        for (name, path) in [
            ("DAILY_DB", &self.daily_db),
            ("IMAGES_DB", &self.images_db),
            ("USAGE_DB", &self.usage_db),
        ] {
            if path.as_os_str().is_empty() {
                return Err(format!("{} cannot be empty", name));
            }
        }

        if self.daily_db == self.images_db
            || self.daily_db == self.usage_db
            || self.images_db == self.usage_db
        {
            return Err("DAILY_DB, IMAGES_DB and USAGE_DB must be distinct files".to_string());
        }

        if self.usage_retention_days < 1 {
            return Err("USAGE_RETENTION_DAYS must be at least 1".to_string());
        }

        if self.max_upload_bytes == 0 {
            return Err("MAX_UPLOAD_BYTES must be greater than 0".to_string());
        }

        Ok(())
    }

    pub fn access_policy(&self) -> AccessPolicy {
        AccessPolicy::new(
            self.admin_user_ids.clone(),
            self.config_guild_id,
            self.allowed_guild_ids.clone(),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from("images"),
            daily_db: PathBuf::from("daily.json"),
            images_db: PathBuf::from("images_db.json"),
            usage_db: PathBuf::from("usage.json"),
            max_daily_random: DEFAULT_MAX_DAILY_RANDOM,
            usage_retention_days: DEFAULT_RETENTION_DAYS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            admin_user_ids: HashSet::new(),
            config_guild_id: None,
            allowed_guild_ids: HashSet::new(),
        }
    }
}

/// Ids separated by commas and/or whitespace; unparsable entries are skipped
fn parse_id_list(raw: &str) -> HashSet<u64> {
    ID_SEPARATOR
        .split(raw.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                tracing::warn!("Ignoring malformed id {:?}", s);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_list_mixed_separators() {
        let ids = parse_id_list(" 1, 2 3,,\n4 ");
        assert_eq!(ids, HashSet::from([1, 2, 3, 4]));
        assert!(parse_id_list("").is_empty());
        assert_eq!(parse_id_list("5,abc"), HashSet::from([5]));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_shared_documents() {
        let config = Config {
            usage_db: PathBuf::from("daily.json"),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_retention() {
        let config = Config {
            usage_retention_days: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
