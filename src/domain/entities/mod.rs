mod daily_picks;
mod image_record;
mod lenient;
mod metadata_catalog;
mod usage_ledger;

pub use daily_picks::DailyPicks;
pub use image_record::{ImageRecord, RecordUpdate};
pub use metadata_catalog::{MetadataCatalog, MetaLookup};
pub use usage_ledger::UsageLedger;
