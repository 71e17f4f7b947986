use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::application::ports::{
    CatalogRepository, DailyPickRepository, RepositoryError, UsageRepository,
};
use crate::domain::entities::{DailyPicks, MetadataCatalog, UsageLedger};
use crate::infrastructure::storage::write_atomic;

/// A single JSON document on disk.
///
/// Reads never fail: a missing or unparsable file yields `T::default()`.
/// Writes go through a temp sibling and an atomic rename, so a crash leaves
/// either the old or the new document. There is no locking; the last writer
/// wins.
pub struct JsonDocument<T> {
    path: PathBuf,
    durable_writes: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_durability(path, true)
    }

    pub fn with_durability(path: impl Into<PathBuf>, durable_writes: bool) -> Self {
        Self {
            path: path.into(),
            durable_writes,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read_or_default(&self) -> T {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("{:?} not found, starting empty", self.path);
                return T::default();
            }
            Err(e) => {
                warn!("Failed to read {:?}, using empty document: {}", self.path, e);
                return T::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Failed to parse {:?}, using empty document: {}", self.path, e);
                T::default()
            }
        }
    }

    pub async fn write(&self, doc: &T) -> Result<(), RepositoryError> {
        let bytes = serde_json::to_vec_pretty(doc)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        write_atomic(&self.path, &bytes, self.durable_writes).await?;
        debug!("Saved {:?} ({} bytes)", self.path, bytes.len());
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for JsonDocument<MetadataCatalog> {
    async fn load(&self) -> MetadataCatalog {
        self.read_or_default().await
    }

    async fn save(&self, catalog: &MetadataCatalog) -> Result<(), RepositoryError> {
        self.write(catalog).await
    }
}

#[async_trait]
impl DailyPickRepository for JsonDocument<DailyPicks> {
    async fn load(&self) -> DailyPicks {
        self.read_or_default().await
    }

    async fn save(&self, picks: &DailyPicks) -> Result<(), RepositoryError> {
        self.write(picks).await
    }
}

#[async_trait]
impl UsageRepository for JsonDocument<UsageLedger> {
    async fn load(&self) -> UsageLedger {
        self.read_or_default().await
    }

    async fn save(&self, ledger: &UsageLedger) -> Result<(), RepositoryError> {
        self.write(ledger).await
    }
}
