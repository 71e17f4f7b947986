mod catalog_admin;
mod daily_pick;
mod image_metadata;
mod pool_selector;
mod random_pull;
mod upload_picture;
mod usage_counter;

pub use catalog_admin::{CatalogAdminUseCase, MAX_SUGGESTIONS};
pub use daily_pick::DailyPickCache;
pub use image_metadata::ImageMetadataIndex;
pub use pool_selector::PoolSelector;
pub use random_pull::{RandomPullUseCase, DEFAULT_MAX_DAILY_RANDOM};
pub use upload_picture::{UploadPictureUseCase, DEFAULT_MAX_UPLOAD_BYTES};
pub use usage_counter::{UsageCounter, DEFAULT_RETENTION_DAYS};
