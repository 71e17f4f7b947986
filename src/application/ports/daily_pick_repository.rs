use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::entities::DailyPicks;
#[cfg(test)]
use mockall::{automock, predicate::*};

/// Port for the daily pick document
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DailyPickRepository: Send + Sync {
    async fn load(&self) -> DailyPicks;

    async fn save(&self, picks: &DailyPicks) -> Result<(), RepositoryError>;
}
