use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{ImageMetadataIndex, PoolSelector};
use crate::application::dto::{DailyPicture, PictureDto};
use crate::application::errors::PictureError;
use crate::application::ports::{Clock, DailyPickRepository, MediaLibrary};
use crate::domain::value_objects::ImagePath;

/// One picture per UTC day, shared by everyone
#[derive(Clone)]
pub struct DailyPickCache {
    daily_repo: Arc<dyn DailyPickRepository>,
    library: Arc<dyn MediaLibrary>,
    metadata: ImageMetadataIndex,
    selector: PoolSelector,
    clock: Arc<dyn Clock>,
}

impl DailyPickCache {
    pub fn new(
        daily_repo: Arc<dyn DailyPickRepository>,
        library: Arc<dyn MediaLibrary>,
        metadata: ImageMetadataIndex,
        selector: PoolSelector,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            daily_repo,
            library,
            metadata,
            selector,
            clock,
        }
    }

    /// Return today's cached pick, or draw and record a new one.
    ///
    /// A cached pick is reused only while its file exists and is not
    /// blacklisted; otherwise it is replaced by a fresh draw from `pool`.
    pub async fn pick_or_get_today(&self, pool: &[ImagePath]) -> Result<ImagePath, PictureError> {
        let today = self.clock.today();
        let mut picks = self.daily_repo.load().await;

        if let Some(cached) = picks.get(today) {
            if !self.library.exists(&cached).await {
                warn!("Daily pick {} for {} no longer exists, re-picking", cached, today);
            } else if self.metadata.is_blacklisted(&cached).await {
                warn!("Daily pick {} for {} is blacklisted, re-picking", cached, today);
            } else {
                debug!("Reusing daily pick {} for {}", cached, today);
                return Ok(cached);
            }
        }

        let choice = self.selector.choose_random(pool)?;
        picks.record(today, &choice);
        self.daily_repo.save(&picks).await?;

        info!("Picked {} as the picture for {}", choice, today);
        Ok(choice)
    }

    /// Full daily flow: current pool, today's pick, its rarity
    pub async fn todays_picture(&self) -> Result<DailyPicture, PictureError> {
        let pool = self.selector.eligible().await?;
        let path = self.pick_or_get_today(&pool).await?;
        let record = self.metadata.get_meta(&path).await?.into_record();

        Ok(DailyPicture {
            date: self.clock.today(),
            picture: PictureDto::new(path, &record),
        })
    }
}
