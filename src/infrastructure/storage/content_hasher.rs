use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, BufReader};

use crate::application::ports::StorageError;
use crate::domain::value_objects::ContentHash;

/// 256KB reads keep large video files from being pulled into memory at once
const BUFFER_SIZE: usize = 256 * 1024;

/// Streaming SHA-256 over files already in the library.
///
/// Upload payloads are hashed in memory through [`ContentHash::compute`];
/// this is for files on disk, which can be much larger than an upload.
pub struct ContentHasher;

impl ContentHasher {
    /// Compute the SHA-256 hash of an existing file.
    ///
    /// A missing file maps to [`StorageError::NotFound`] so callers can tell
    /// a vanished picture apart from a read failure.
    pub async fn hash_file(path: &Path) -> Result<ContentHash, StorageError> {
        let file = File::open(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(path.display().to_string())
            } else {
                StorageError::Io(e)
            }
        })?;
        let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; BUFFER_SIZE];

        loop {
            let n = reader.read(&mut buffer).await?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }

        ContentHash::from_digest(&hasher.finalize())
            .map_err(|e| StorageError::Internal(e.to_string()))
    }
}
