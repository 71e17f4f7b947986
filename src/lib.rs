//! # picture_store - Metadata and usage store for a picture bot
//!
//! Serves pictures from a directory on a daily and random basis, keeping a
//! few small JSON documents next to it:
//!
//! - per-file rarity, blacklist flag and content hash (plus a hash -> path index)
//! - the pick of the day, keyed by UTC date
//! - per-user daily usage counters with rolling retention
//!
//! ## Architecture Layers
//!
//! - **Domain**: entities, value objects, validation
//! - **Application**: use cases, ports and the admin session
//! - **Infrastructure**: JSON documents, the media directory, clock and RNG
//!
//! ## Example Usage
//!
//! ```no_run
//! use picture_store::{ApplicationBuilder, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let services = ApplicationBuilder::new(Config::from_env())
//!     .with_infrastructure()
//!     .await?
//!     .build()?;
//!
//! let today = services.daily.todays_picture().await?;
//! println!("{} is {}", today.picture.name, today.picture.rarity);
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::builder::{ApplicationBuilder, PictureServices};
pub use application::errors::PictureError;
pub use application::{access, dto, ports, session, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};
