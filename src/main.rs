use anyhow::{anyhow, Context};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use picture_store::{ApplicationBuilder, Config, PictureError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting picture store");

    let config = Config::from_env();
    config
        .validate()
        .map_err(|e| anyhow!(e))
        .context("invalid configuration")?;
    info!("Configuration loaded and validated");

    let services = ApplicationBuilder::new(config)
        .with_infrastructure()
        .await
        .map_err(|e| anyhow!(e.to_string()))
        .context("failed to open storage")?
        .build()
        .map_err(|e| anyhow!(e.to_string()))?;

    let library = services.library.list_all().await?;
    let pool = services.selector.list_pool(&library).await?;
    info!(
        "Library has {} files, {} eligible for selection",
        library.len(),
        pool.len()
    );

    match services.daily.todays_picture().await {
        Ok(today) => info!(
            "Picture of {}: {} ({})",
            today.date, today.picture.name, today.picture.rarity
        ),
        Err(PictureError::NoEligibleImages) => warn!("No eligible pictures for today"),
        Err(e) => return Err(e).context("failed to pick today's picture"),
    }

    Ok(())
}
