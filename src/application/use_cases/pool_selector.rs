use std::sync::Arc;
use tracing::debug;

use super::ImageMetadataIndex;
use crate::application::errors::PictureError;
use crate::application::ports::{MediaLibrary, RandomSource};
use crate::domain::value_objects::ImagePath;

/// Derives the eligible pool and draws from it
#[derive(Clone)]
pub struct PoolSelector {
    library: Arc<dyn MediaLibrary>,
    metadata: ImageMetadataIndex,
    random: Arc<dyn RandomSource>,
}

impl PoolSelector {
    pub fn new(
        library: Arc<dyn MediaLibrary>,
        metadata: ImageMetadataIndex,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            library,
            metadata,
            random,
        }
    }

    /// Keep files that still exist and are not blacklisted.
    ///
    /// Files seen for the first time get their default record registered.
    pub async fn list_pool(&self, all_files: &[ImagePath]) -> Result<Vec<ImagePath>, PictureError> {
        let mut existing = Vec::with_capacity(all_files.len());
        for path in all_files {
            if self.library.exists(path).await {
                existing.push(path.clone());
            }
        }

        let catalog = self.metadata.register_all(&existing).await?;
        let pool: Vec<ImagePath> = existing
            .into_iter()
            .filter(|p| !catalog.is_blacklisted(p))
            .collect();

        debug!(
            "Eligible pool: {} of {} file(s)",
            pool.len(),
            all_files.len()
        );
        Ok(pool)
    }

    /// Full library listing filtered down to the pool
    pub async fn eligible(&self) -> Result<Vec<ImagePath>, PictureError> {
        let all_files = self.library.list_all().await?;
        self.list_pool(&all_files).await
    }

    /// Uniform draw from the pool
    pub fn choose_random(&self, pool: &[ImagePath]) -> Result<ImagePath, PictureError> {
        if pool.is_empty() {
            return Err(PictureError::NoEligibleImages);
        }
        let index = self.random.pick_index(pool.len()).min(pool.len() - 1);
        Ok(pool[index].clone())
    }
}
