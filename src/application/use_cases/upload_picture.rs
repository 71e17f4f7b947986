use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

use super::ImageMetadataIndex;
use crate::application::dto::{PictureDto, UploadOutcome, UploadRequest};
use crate::application::errors::PictureError;
use crate::application::ports::MediaLibrary;
use crate::domain::entities::RecordUpdate;
use crate::domain::validation::Validation;
use crate::domain::value_objects::{ContentHash, Rarity};

/// Default upload ceiling (8 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 8 * 1024 * 1024;

/// Use case: add a picture to the library, rejecting content already present
#[derive(Clone)]
pub struct UploadPictureUseCase {
    library: Arc<dyn MediaLibrary>,
    metadata: ImageMetadataIndex,
    allowed_extensions: Vec<String>,
    max_upload_bytes: u64,
}

impl UploadPictureUseCase {
    pub fn new(
        library: Arc<dyn MediaLibrary>,
        metadata: ImageMetadataIndex,
        allowed_extensions: Vec<String>,
        max_upload_bytes: u64,
    ) -> Self {
        Self {
            library,
            metadata,
            allowed_extensions,
            max_upload_bytes,
        }
    }

    /// Execute upload workflow
    pub async fn execute(&self, request: UploadRequest) -> Result<UploadOutcome, PictureError> {
        // 1. Validate everything up front
        Validation::validate_media_filename(&request.filename, &self.allowed_extensions)?;
        Validation::validate_upload_size(request.bytes.len() as u64, self.max_upload_bytes)?;
        let rarity = request.rarity.as_deref().map(Rarity::from_str).transpose()?;

        // 2. Duplicate detection by content
        let content_hash = ContentHash::compute(&request.bytes);
        if let Some(existing) = self.metadata.find_by_hash(&content_hash).await {
            if self.library.exists(&existing).await {
                info!(
                    "Upload {} duplicates {} (sha256 {})",
                    request.filename,
                    existing,
                    content_hash.short()
                );
                return Ok(UploadOutcome::Duplicate { existing });
            }
            warn!(
                "Hash {} points at missing file {}, accepting upload",
                content_hash.short(),
                existing
            );
        }

        // 3. Write the file
        let path = self
            .library
            .store_upload(&request.filename, &request.bytes)
            .await?;

        // 4. Register it with its hash and optional rarity
        let record = self
            .metadata
            .update(
                &path,
                &RecordUpdate {
                    rarity,
                    blacklisted: None,
                    content_hash: Some(content_hash),
                },
            )
            .await?;

        info!("Stored upload {} ({} bytes)", path, request.bytes.len());
        Ok(UploadOutcome::Stored(PictureDto::new(path, &record)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockCatalogRepository, MockMediaLibrary};
    use crate::domain::entities::MetadataCatalog;
    use crate::domain::validation::DEFAULT_MEDIA_EXTENSIONS;
    use crate::domain::value_objects::ImagePath;

    fn allowed() -> Vec<String> {
        DEFAULT_MEDIA_EXTENSIONS.iter().map(|s| s.to_string()).collect()
    }

    fn request(filename: &str, bytes: &[u8], rarity: Option<&str>) -> UploadRequest {
        UploadRequest {
            filename: filename.to_string(),
            bytes: bytes.to_vec(),
            rarity: rarity.map(str::to_string),
        }
    }

    fn untouched_use_case() -> UploadPictureUseCase {
        let mut library = MockMediaLibrary::new();
        library.expect_store_upload().never();
        let mut repo = MockCatalogRepository::new();
        repo.expect_save().never();

        UploadPictureUseCase::new(
            Arc::new(library),
            ImageMetadataIndex::new(Arc::new(repo)),
            allowed(),
            16,
        )
    }

    #[tokio::test]
    async fn test_rejects_unsupported_extension() {
        let err = untouched_use_case()
            .execute(request("notes.txt", b"hi", None))
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[tokio::test]
    async fn test_rejects_oversized_payload() {
        let err = untouched_use_case()
            .execute(request("big.png", &[0u8; 17], None))
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[tokio::test]
    async fn test_rejects_invalid_rarity_before_writing() {
        let err = untouched_use_case()
            .execute(request("a.png", b"x", Some("Godlike")))
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[tokio::test]
    async fn test_stores_and_registers_hash() {
        let mut library = MockMediaLibrary::new();
        library
            .expect_store_upload()
            .times(1)
            .returning(|name, _| Ok(ImagePath::from_key(&format!("/p/{}", name))));

        let mut repo = MockCatalogRepository::new();
        repo.expect_load().returning(MetadataCatalog::default);
        repo.expect_save()
            .times(1)
            .withf(|catalog| catalog.hash_count() == 1)
            .returning(|_| Ok(()));

        let uc = UploadPictureUseCase::new(
            Arc::new(library),
            ImageMetadataIndex::new(Arc::new(repo)),
            allowed(),
            16,
        );

        let outcome = uc.execute(request("cat.png", b"meow", Some("Rare"))).await.unwrap();

        match outcome {
            UploadOutcome::Stored(picture) => {
                assert_eq!(picture.name, "cat.png");
                assert_eq!(picture.rarity, Rarity::Rare);
                assert_eq!(
                    picture.content_hash.as_deref(),
                    Some(ContentHash::compute(b"meow").as_hex())
                );
            }
            other => panic!("expected Stored, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reports_duplicate_without_writing() {
        let mut catalog = MetadataCatalog::default();
        catalog.apply(
            &ImagePath::from_key("/p/original.png"),
            &RecordUpdate {
                content_hash: Some(ContentHash::compute(b"meow")),
                ..Default::default()
            },
        );

        let mut library = MockMediaLibrary::new();
        library.expect_exists().returning(|_| true);
        library.expect_store_upload().never();

        let mut repo = MockCatalogRepository::new();
        repo.expect_load().returning(move || catalog.clone());
        repo.expect_save().never();

        let uc = UploadPictureUseCase::new(
            Arc::new(library),
            ImageMetadataIndex::new(Arc::new(repo)),
            allowed(),
            16,
        );

        let outcome = uc.execute(request("copy.png", b"meow", None)).await.unwrap();
        assert!(matches!(
            outcome,
            UploadOutcome::Duplicate { existing } if existing == ImagePath::from_key("/p/original.png")
        ));
    }
}
