use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::application::ports::{MediaLibrary, StorageError};
use crate::domain::validation::{Validation, DEFAULT_MEDIA_EXTENSIONS};
use crate::domain::value_objects::{ContentHash, ImagePath};
use crate::infrastructure::storage::{write_atomic, ContentHasher, PathBuilder};

/// Upper bound on `_n` suffixes tried before giving up on a name
const MAX_NAME_ATTEMPTS: u32 = 10_000;

/// Pictures stored as plain files under one directory tree
pub struct LocalMediaLibrary {
    root: PathBuf,
    allowed_extensions: Vec<String>,
    durable_writes: bool,
}

impl LocalMediaLibrary {
    pub fn new(root: PathBuf) -> Self {
        Self::with_extensions(
            root,
            DEFAULT_MEDIA_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        )
    }

    pub fn with_extensions(root: PathBuf, allowed_extensions: Vec<String>) -> Self {
        Self {
            root,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            durable_writes: true,
        }
    }

    /// Skip fsync on uploads (tests, throwaway libraries)
    pub fn with_durability(mut self, durable_writes: bool) -> Self {
        self.durable_writes = durable_writes;
        self
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// Create the library directory if it does not exist
    pub async fn init(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).await?;
        info!("Media library ready at {:?}", self.root);
        Ok(())
    }

    fn scan(root: &Path, allowed: &[String]) -> Vec<ImagePath> {
        let mut found: Vec<ImagePath> = WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    debug!("Skipping unreadable entry: {}", err);
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter(|e| Validation::has_media_extension(e.path(), allowed))
            .map(|e| ImagePath::resolve(e.path()))
            .collect();

        found.sort();
        found.dedup();
        found
    }
}

#[async_trait]
impl MediaLibrary for LocalMediaLibrary {
    async fn list_all(&self) -> Result<Vec<ImagePath>, StorageError> {
        if !fs::try_exists(&self.root).await.unwrap_or(false) {
            warn!("Images directory {:?} does not exist", self.root);
            return Ok(Vec::new());
        }

        let root = self.root.clone();
        let allowed = self.allowed_extensions.clone();
        let files = tokio::task::spawn_blocking(move || Self::scan(&root, &allowed))
            .await
            .map_err(|e| StorageError::Internal(format!("directory scan failed: {}", e)))?;

        debug!("Listed {} media files under {:?}", files.len(), self.root);
        Ok(files)
    }

    async fn exists(&self, path: &ImagePath) -> bool {
        fs::metadata(path.as_path())
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    async fn hash_file(&self, path: &ImagePath) -> Result<ContentHash, StorageError> {
        ContentHasher::hash_file(path.as_path()).await
    }

    async fn store_upload(&self, filename: &str, bytes: &[u8]) -> Result<ImagePath, StorageError> {
        let safe_name = Validation::sanitize_filename(filename);
        fs::create_dir_all(&self.root).await?;

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let candidate = PathBuilder::upload_candidate(&self.root, &safe_name, attempt);
            if fs::try_exists(&candidate).await? {
                continue;
            }

            write_atomic(&candidate, bytes, self.durable_writes).await?;
            let stored = ImagePath::resolve(&candidate);
            info!("Stored upload {} ({} bytes)", stored, bytes.len());
            return Ok(stored);
        }

        Err(StorageError::Internal(format!(
            "no free file name for {}",
            safe_name
        )))
    }
}
