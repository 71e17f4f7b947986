use std::sync::Arc;
use tracing::{debug, info};

use crate::application::errors::PictureError;
use crate::application::ports::{Clock, UsageRepository};
use crate::domain::value_objects::UserId;

/// Days of history kept in the usage document
pub const DEFAULT_RETENTION_DAYS: usize = 7;

/// Per-user, per-day draw counter.
///
/// The quota itself is enforced by the caller; this only counts.
#[derive(Clone)]
pub struct UsageCounter {
    usage_repo: Arc<dyn UsageRepository>,
    clock: Arc<dyn Clock>,
    retention_days: usize,
}

impl UsageCounter {
    pub fn new(usage_repo: Arc<dyn UsageRepository>, clock: Arc<dyn Clock>) -> Self {
        Self::with_retention(usage_repo, clock, DEFAULT_RETENTION_DAYS)
    }

    pub fn with_retention(
        usage_repo: Arc<dyn UsageRepository>,
        clock: Arc<dyn Clock>,
        retention_days: usize,
    ) -> Self {
        Self {
            usage_repo,
            clock,
            retention_days: retention_days.max(1),
        }
    }

    /// Today's count for the user
    pub async fn get_uses(&self, user: UserId) -> u64 {
        let today = self.clock.today();
        self.usage_repo.load().await.uses(today, user)
    }

    /// Count one use, prune old days, persist; returns the new count
    pub async fn increment(&self, user: UserId) -> Result<u64, PictureError> {
        let today = self.clock.today();
        let mut ledger = self.usage_repo.load().await;

        let count = ledger.increment(today, user);
        let dropped = ledger.prune(self.retention_days);
        if !dropped.is_empty() {
            debug!("Pruned {} day(s) from the usage ledger", dropped.len());
        }

        self.usage_repo.save(&ledger).await?;
        info!("User {} has {} use(s) on {}", user, count, today);
        Ok(count)
    }
}
