use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::entities::UsageLedger;
#[cfg(test)]
use mockall::{automock, predicate::*};

/// Port for the usage ledger document
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UsageRepository: Send + Sync {
    async fn load(&self) -> UsageLedger;

    async fn save(&self, ledger: &UsageLedger) -> Result<(), RepositoryError>;
}
