use tracing::info;

use super::{ImageMetadataIndex, PoolSelector, UsageCounter};
use crate::application::dto::{PictureDto, RandomPull};
use crate::application::errors::PictureError;
use crate::domain::value_objects::UserId;

/// Default number of random pulls per user per UTC day
pub const DEFAULT_MAX_DAILY_RANDOM: u64 = 3;

/// Use case: draw a random picture against the user's daily quota
#[derive(Clone)]
pub struct RandomPullUseCase {
    selector: PoolSelector,
    metadata: ImageMetadataIndex,
    usage: UsageCounter,
    max_per_day: u64,
}

impl RandomPullUseCase {
    pub fn new(
        selector: PoolSelector,
        metadata: ImageMetadataIndex,
        usage: UsageCounter,
        max_per_day: u64,
    ) -> Self {
        Self {
            selector,
            metadata,
            usage,
            max_per_day,
        }
    }

    /// Execute pull workflow
    pub async fn execute(&self, user: UserId) -> Result<RandomPull, PictureError> {
        // 1. Quota check happens before touching the pool
        let used = self.usage.get_uses(user).await;
        if used >= self.max_per_day {
            return Err(PictureError::QuotaExhausted {
                used,
                max: self.max_per_day,
            });
        }

        // 2. Draw from the current pool
        let pool = self.selector.eligible().await?;
        let path = self.selector.choose_random(&pool)?;
        let record = self.metadata.get_meta(&path).await?.into_record();

        // 3. Only a successful draw consumes a pull
        let count = self.usage.increment(user).await?;
        let remaining = self.max_per_day.saturating_sub(count);
        info!(
            "User {} pulled {} ({} left today)",
            user,
            path.file_name(),
            remaining
        );

        Ok(RandomPull {
            picture: PictureDto::new(path, &record),
            remaining,
            max_per_day: self.max_per_day,
        })
    }
}
