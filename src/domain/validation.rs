//! Validation helpers for picture files entering the library
//!
//! Uploads and directory listings share the same notion of what counts as
//! a media file, so the rules live here rather than in either caller.

use crate::domain::errors::DomainError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Extensions served by default (lowercase, without the dot)
pub const DEFAULT_MEDIA_EXTENSIONS: [&str; 8] =
    ["jpg", "jpeg", "png", "gif", "webp", "mp4", "webm", "mov"];

/// Anything outside this set is replaced when storing an upload
static UNSAFE_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]").expect("Invalid filename regex"));

/// Validation result type
pub type ValidationResult<T> = Result<T, DomainError>;

/// Common validation utilities
pub struct Validation;

impl Validation {
    /// Validate that a string is not empty
    pub fn validate_not_empty(value: &str, field_name: &str) -> ValidationResult<()> {
        if value.trim().is_empty() {
            return Err(DomainError::ValidationError {
                field: field_name.to_string(),
                message: "Field cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Lowercased extension of a path, if any
    pub fn extension_of(path: &Path) -> Option<String> {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    /// Whether the file name carries one of the allowed extensions (case-insensitive)
    pub fn has_media_extension(path: &Path, allowed: &[String]) -> bool {
        Self::extension_of(path).is_some_and(|ext| allowed.iter().any(|a| *a == ext))
    }

    /// Validate the file name of an incoming upload
    pub fn validate_media_filename(filename: &str, allowed: &[String]) -> ValidationResult<()> {
        Self::validate_not_empty(filename, "filename")?;

        if !Self::has_media_extension(Path::new(filename), allowed) {
            return Err(DomainError::ValidationError {
                field: "filename".to_string(),
                message: format!("Unsupported file type: {}", filename),
            });
        }
        Ok(())
    }

    /// Validate the payload size of an incoming upload
    pub fn validate_upload_size(size: u64, max: u64) -> ValidationResult<()> {
        if size > max {
            return Err(DomainError::ValidationError {
                field: "file".to_string(),
                message: format!("File too large: {} bytes exceeds {} bytes", size, max),
            });
        }
        Ok(())
    }

    /// Replace every character outside `[A-Za-z0-9._-]` with `_`
    pub fn sanitize_filename(filename: &str) -> String {
        UNSAFE_FILENAME_CHARS.replace_all(filename, "_").into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        DEFAULT_MEDIA_EXTENSIONS.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_has_media_extension_case_insensitive() {
        assert!(Validation::has_media_extension(Path::new("cat.JPG"), &allowed()));
        assert!(Validation::has_media_extension(Path::new("dir/clip.webm"), &allowed()));
        assert!(!Validation::has_media_extension(Path::new("notes.txt"), &allowed()));
        assert!(!Validation::has_media_extension(Path::new("README"), &allowed()));
    }

    #[test]
    fn test_validate_media_filename() {
        assert!(Validation::validate_media_filename("a.png", &allowed()).is_ok());
        assert!(matches!(
            Validation::validate_media_filename("a.exe", &allowed()),
            Err(DomainError::ValidationError { .. })
        ));
        assert!(Validation::validate_media_filename("  ", &allowed()).is_err());
    }

    #[test]
    fn test_validate_upload_size() {
        assert!(Validation::validate_upload_size(10, 10).is_ok());
        assert!(Validation::validate_upload_size(11, 10).is_err());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(Validation::sanitize_filename("my cat (1).jpg"), "my_cat__1_.jpg");
        assert_eq!(Validation::sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(Validation::sanitize_filename("ok-name_2.png"), "ok-name_2.png");
    }
}
