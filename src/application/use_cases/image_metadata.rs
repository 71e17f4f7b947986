use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

use crate::application::dto::MetaUpdate;
use crate::application::errors::PictureError;
use crate::application::ports::CatalogRepository;
use crate::domain::entities::{ImageRecord, MetaLookup, MetadataCatalog, RecordUpdate};
use crate::domain::value_objects::{ContentHash, ImagePath, Rarity};

/// Per-picture metadata plus the content-hash reverse index.
///
/// Every mutating call is a full load-modify-save of the catalog document;
/// two concurrent callers can overwrite each other (last writer wins).
#[derive(Clone)]
pub struct ImageMetadataIndex {
    catalog_repo: Arc<dyn CatalogRepository>,
}

impl ImageMetadataIndex {
    pub fn new(catalog_repo: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog_repo }
    }

    /// Get-or-create; `MetaLookup::Created` means the default record was persisted
    pub async fn get_meta(&self, path: &ImagePath) -> Result<MetaLookup, PictureError> {
        let mut catalog = self.catalog_repo.load().await;
        let lookup = catalog.get_or_insert(path);

        if lookup.was_created() {
            debug!("Registering default metadata for {}", path);
            self.catalog_repo.save(&catalog).await?;
        }

        Ok(lookup)
    }

    /// Apply a raw patch; input is validated before anything is loaded or written
    pub async fn set_meta(
        &self,
        path: &ImagePath,
        update: MetaUpdate,
    ) -> Result<ImageRecord, PictureError> {
        let update = Self::parse_update(update)?;
        self.update(path, &update).await
    }

    /// Apply an already validated patch; an empty patch writes nothing
    pub async fn update(
        &self,
        path: &ImagePath,
        update: &RecordUpdate,
    ) -> Result<ImageRecord, PictureError> {
        let mut catalog = self.catalog_repo.load().await;
        if update.is_empty() {
            return Ok(catalog.get(path).cloned().unwrap_or_default());
        }

        let record = catalog.apply(path, update);
        self.catalog_repo.save(&catalog).await?;

        info!(
            "Updated metadata for {}: rarity={}, blacklisted={}",
            path,
            record.rarity(),
            record.is_blacklisted()
        );
        Ok(record)
    }

    /// Path most recently registered under the hash
    pub async fn find_by_hash(&self, hash: &ContentHash) -> Option<ImagePath> {
        self.catalog_repo.load().await.find_by_hash(hash)
    }

    /// Read-only check; never creates a record
    pub async fn is_blacklisted(&self, path: &ImagePath) -> bool {
        self.catalog_repo.load().await.is_blacklisted(path)
    }

    /// Read-only snapshot of the whole catalog
    pub async fn snapshot(&self) -> MetadataCatalog {
        self.catalog_repo.load().await
    }

    /// Make sure every path has a record, saving once if any were added.
    ///
    /// Returns the catalog as persisted so callers can filter without
    /// reloading it.
    pub async fn register_all(&self, paths: &[ImagePath]) -> Result<MetadataCatalog, PictureError> {
        let mut catalog = self.catalog_repo.load().await;
        let created = paths
            .iter()
            .filter(|p| catalog.get_or_insert(p).was_created())
            .count();

        if created > 0 {
            debug!("Registering default metadata for {} new file(s)", created);
            self.catalog_repo.save(&catalog).await?;
        }

        Ok(catalog)
    }

    fn parse_update(update: MetaUpdate) -> Result<RecordUpdate, PictureError> {
        let rarity = update
            .rarity
            .as_deref()
            .map(Rarity::from_str)
            .transpose()?;
        let content_hash = update.content_hash.map(ContentHash::from_hex).transpose()?;

        Ok(RecordUpdate {
            rarity,
            blacklisted: update.blacklisted,
            content_hash,
        })
    }
}
