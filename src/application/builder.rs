use std::sync::Arc;

use tracing::info;

use crate::application::ports::{
    CatalogRepository, Clock, DailyPickRepository, MediaLibrary, RandomSource, UsageRepository,
};
use crate::application::use_cases::{
    CatalogAdminUseCase, DailyPickCache, ImageMetadataIndex, PoolSelector, RandomPullUseCase,
    UploadPictureUseCase, UsageCounter,
};
use crate::config::Config;
use crate::domain::entities::{DailyPicks, MetadataCatalog, UsageLedger};
use crate::infrastructure::{
    clock::SystemClock,
    persistence::JsonDocument,
    random::ThreadRandomSource,
    storage::LocalMediaLibrary,
};

/// Every service the command layer talks to, wired against one set of documents
#[derive(Clone)]
pub struct PictureServices {
    pub library: Arc<dyn MediaLibrary>,
    pub metadata: ImageMetadataIndex,
    pub selector: PoolSelector,
    pub daily: DailyPickCache,
    pub usage: UsageCounter,
    pub random_pull: RandomPullUseCase,
    pub upload: UploadPictureUseCase,
    pub admin: CatalogAdminUseCase,
}

/// Application builder for clean dependency injection and setup
pub struct ApplicationBuilder {
    config: Config,
    durable_writes: bool,
    catalog_repo: Option<Arc<dyn CatalogRepository>>,
    daily_repo: Option<Arc<dyn DailyPickRepository>>,
    usage_repo: Option<Arc<dyn UsageRepository>>,
    library: Option<Arc<dyn MediaLibrary>>,
    media_extensions: Vec<String>,
    clock: Option<Arc<dyn Clock>>,
    random: Option<Arc<dyn RandomSource>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            durable_writes: true,
            catalog_repo: None,
            daily_repo: None,
            usage_repo: None,
            library: None,
            media_extensions: Vec::new(),
            clock: None,
            random: None,
        }
    }

    /// Skip fsync on document and upload writes
    pub fn with_durable_writes(mut self, durable_writes: bool) -> Self {
        self.durable_writes = durable_writes;
        self
    }

    /// Open the JSON documents and the images directory named in the config
    pub async fn with_infrastructure(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        let catalog_repo: Arc<dyn CatalogRepository> = Arc::new(
            JsonDocument::<MetadataCatalog>::with_durability(
                self.config.images_db.clone(),
                self.durable_writes,
            ),
        );
        let daily_repo: Arc<dyn DailyPickRepository> = Arc::new(
            JsonDocument::<DailyPicks>::with_durability(
                self.config.daily_db.clone(),
                self.durable_writes,
            ),
        );
        let usage_repo: Arc<dyn UsageRepository> = Arc::new(
            JsonDocument::<UsageLedger>::with_durability(
                self.config.usage_db.clone(),
                self.durable_writes,
            ),
        );

        let library = LocalMediaLibrary::new(self.config.images_dir.clone())
            .with_durability(self.durable_writes);
        library.init().await?;
        self.media_extensions = library.allowed_extensions().to_vec();
        let library: Arc<dyn MediaLibrary> = Arc::new(library);

        self.catalog_repo = Some(catalog_repo);
        self.daily_repo = Some(daily_repo);
        self.usage_repo = Some(usage_repo);
        self.library = Some(library);

        info!(
            "Infrastructure layer initialized: images={:?} metadata={:?} daily={:?} usage={:?}",
            self.config.images_dir, self.config.images_db, self.config.daily_db, self.config.usage_db
        );
        Ok(self)
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_random_source(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = Some(random);
        self
    }

    /// Build all services; clock and random source fall back to the system ones
    pub fn build(self) -> Result<PictureServices, Box<dyn std::error::Error>> {
        let catalog_repo = self
            .catalog_repo
            .ok_or("Metadata repository not initialized")?;
        let daily_repo = self.daily_repo.ok_or("Daily pick repository not initialized")?;
        let usage_repo = self.usage_repo.ok_or("Usage repository not initialized")?;
        let library = self.library.ok_or("Media library not initialized")?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let random = self
            .random
            .unwrap_or_else(|| Arc::new(ThreadRandomSource));

        let metadata = ImageMetadataIndex::new(catalog_repo);
        let selector = PoolSelector::new(Arc::clone(&library), metadata.clone(), random);
        let usage = UsageCounter::with_retention(
            usage_repo,
            Arc::clone(&clock),
            self.config.usage_retention_days,
        );

        let daily = DailyPickCache::new(
            daily_repo,
            Arc::clone(&library),
            metadata.clone(),
            selector.clone(),
            clock,
        );

        let random_pull = RandomPullUseCase::new(
            selector.clone(),
            metadata.clone(),
            usage.clone(),
            self.config.max_daily_random,
        );

        let upload = UploadPictureUseCase::new(
            Arc::clone(&library),
            metadata.clone(),
            self.media_extensions,
            self.config.max_upload_bytes,
        );

        let admin = CatalogAdminUseCase::new(
            Arc::clone(&library),
            metadata.clone(),
            self.config.access_policy(),
        );

        info!("Application layer initialized");

        Ok(PictureServices {
            library,
            metadata,
            selector,
            daily,
            usage,
            random_pull,
            upload,
            admin,
        })
    }

    /// Get configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
