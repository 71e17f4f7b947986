mod catalog_repository;
mod clock;
mod daily_pick_repository;
mod media_library;
mod random_source;
mod usage_repository;

pub use catalog_repository::{CatalogRepository, RepositoryError};
pub use clock::Clock;
pub use daily_pick_repository::DailyPickRepository;
pub use media_library::{MediaLibrary, StorageError};
pub use random_source::RandomSource;
pub use usage_repository::UsageRepository;

#[cfg(test)]
pub use catalog_repository::MockCatalogRepository;
#[cfg(test)]
pub use clock::MockClock;
#[cfg(test)]
pub use daily_pick_repository::MockDailyPickRepository;
#[cfg(test)]
pub use media_library::MockMediaLibrary;
#[cfg(test)]
pub use random_source::MockRandomSource;
#[cfg(test)]
pub use usage_repository::MockUsageRepository;
