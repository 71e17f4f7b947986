mod content_hash;
mod date_key;
mod image_path;
mod rarity;
mod user_id;

pub use content_hash::ContentHash;
pub use date_key::DateKey;
pub use image_path::ImagePath;
pub use rarity::Rarity;
pub use user_id::UserId;
