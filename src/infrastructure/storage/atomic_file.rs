use std::path::Path;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use super::PathBuilder;

/// Write `bytes` to `target` via a temp sibling and an atomic rename.
///
/// Readers see either the previous file or the complete new one, never a
/// partial write. With `durable` the temp file and the parent directory are
/// fsynced around the rename.
pub async fn write_atomic(target: &Path, bytes: &[u8], durable: bool) -> std::io::Result<()> {
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let temp_path = PathBuilder::temp_sibling(target, Uuid::new_v4());
    debug!("Writing {} bytes via {:?}", bytes.len(), temp_path);

    if let Err(e) = write_temp(&temp_path, bytes, durable).await {
        warn!("Failed to write temp file {:?}: {}", temp_path, e);
        let _ = fs::remove_file(&temp_path).await;
        return Err(e);
    }

    if let Err(e) = fs::rename(&temp_path, target).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e);
    }

    if durable {
        sync_parent(target).await;
    }
    Ok(())
}

async fn write_temp(temp_path: &Path, bytes: &[u8], durable: bool) -> std::io::Result<()> {
    let mut file = File::create(temp_path).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    if durable {
        file.sync_all().await?;
    }
    Ok(())
}

/// Persist the rename itself; failure here is logged, the data is already in place
async fn sync_parent(target: &Path) {
    let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return;
    };
    match File::open(parent).await {
        Ok(dir) => {
            if let Err(e) = dir.sync_all().await {
                warn!("Failed to sync parent directory after rename: {}", e);
            }
        }
        Err(e) => warn!("Failed to open parent directory for sync: {}", e),
    }
}
