use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

use super::ImageMetadataIndex;
use crate::application::access::{AccessPolicy, Actor};
use crate::application::dto::PictureDto;
use crate::application::errors::PictureError;
use crate::application::ports::MediaLibrary;
use crate::application::session::ConfigSession;
use crate::domain::entities::RecordUpdate;
use crate::domain::value_objects::{ImagePath, Rarity};

/// Autocomplete suggestions are capped at this many names
pub const MAX_SUGGESTIONS: usize = 25;

/// Use case: admin-only browsing and editing of picture metadata
#[derive(Clone)]
pub struct CatalogAdminUseCase {
    library: Arc<dyn MediaLibrary>,
    metadata: ImageMetadataIndex,
    policy: AccessPolicy,
}

impl CatalogAdminUseCase {
    pub fn new(
        library: Arc<dyn MediaLibrary>,
        metadata: ImageMetadataIndex,
        policy: AccessPolicy,
    ) -> Self {
        Self {
            library,
            metadata,
            policy,
        }
    }

    /// Select the next picture in round-robin order over the full library
    pub async fn next(
        &self,
        session: &mut ConfigSession,
        actor: &Actor,
    ) -> Result<PictureDto, PictureError> {
        self.authorize(actor)?;

        let all = self.library.list_all().await?;
        if all.is_empty() {
            return Err(PictureError::NotFound("no images in library".to_string()));
        }

        let path = all[session.advance() % all.len()].clone();
        self.select_path(session, actor, path).await
    }

    /// Select by file name: first exact match (case-insensitive), else first containing match
    pub async fn select(
        &self,
        session: &mut ConfigSession,
        actor: &Actor,
        name: &str,
    ) -> Result<PictureDto, PictureError> {
        self.authorize(actor)?;

        let query = name.trim().to_lowercase();
        if query.is_empty() {
            return Err(PictureError::InvalidRequest("name cannot be empty".to_string()));
        }

        let all = self.library.list_all().await?;
        let found = all
            .iter()
            .find(|p| p.file_name().to_lowercase() == query)
            .or_else(|| all.iter().find(|p| p.file_name().to_lowercase().contains(&query)))
            .cloned()
            .ok_or_else(|| PictureError::NotFound(format!("no match for {}", name)))?;

        self.select_path(session, actor, found).await
    }

    /// Set the rarity of the actor's current selection
    pub async fn set_rarity(
        &self,
        session: &ConfigSession,
        actor: &Actor,
        rarity: &str,
    ) -> Result<PictureDto, PictureError> {
        self.authorize(actor)?;
        let rarity = Rarity::from_str(rarity)?;
        let path = Self::current(session, actor)?;

        let record = self
            .metadata
            .update(
                &path,
                &RecordUpdate {
                    rarity: Some(rarity),
                    ..Default::default()
                },
            )
            .await?;
        Ok(PictureDto::new(path, &record))
    }

    /// Flip the blacklist flag of the actor's current selection
    pub async fn toggle_blacklist(
        &self,
        session: &ConfigSession,
        actor: &Actor,
    ) -> Result<PictureDto, PictureError> {
        self.authorize(actor)?;
        let path = Self::current(session, actor)?;

        let current = self.metadata.get_meta(&path).await?.into_record();
        let record = self
            .metadata
            .update(
                &path,
                &RecordUpdate {
                    blacklisted: Some(!current.is_blacklisted()),
                    ..Default::default()
                },
            )
            .await?;
        Ok(PictureDto::new(path, &record))
    }

    /// File names containing the query (case-insensitive), capped for autocomplete
    pub async fn suggest_names(&self, query: &str) -> Result<Vec<String>, PictureError> {
        let query = query.trim().to_lowercase();
        let names = self
            .library
            .list_all()
            .await?
            .into_iter()
            .map(|p| p.file_name())
            .filter(|n| query.is_empty() || n.to_lowercase().contains(&query))
            .take(MAX_SUGGESTIONS)
            .collect();
        Ok(names)
    }

    /// Hash every library file missing a content hash so duplicates of
    /// pre-existing pictures are caught too. Returns how many were indexed.
    pub async fn backfill_hashes(&self, actor: &Actor) -> Result<usize, PictureError> {
        self.authorize(actor)?;

        let all = self.library.list_all().await?;
        let catalog = self.metadata.snapshot().await;
        let mut indexed = 0;

        for path in all {
            if catalog.get(&path).and_then(|r| r.content_hash()).is_some() {
                continue;
            }
            let hash = match self.library.hash_file(&path).await {
                Ok(hash) => hash,
                Err(e) => {
                    warn!("Skipping {} while backfilling hashes: {}", path, e);
                    continue;
                }
            };
            self.metadata
                .update(
                    &path,
                    &RecordUpdate {
                        content_hash: Some(hash),
                        ..Default::default()
                    },
                )
                .await?;
            indexed += 1;
        }

        info!("Backfilled content hashes for {} file(s)", indexed);
        Ok(indexed)
    }

    async fn select_path(
        &self,
        session: &mut ConfigSession,
        actor: &Actor,
        path: ImagePath,
    ) -> Result<PictureDto, PictureError> {
        let record = self.metadata.get_meta(&path).await?.into_record();
        session.select(actor.user_id, path.clone());
        Ok(PictureDto::new(path, &record))
    }

    fn current(session: &ConfigSession, actor: &Actor) -> Result<ImagePath, PictureError> {
        session
            .selection(actor.user_id)
            .cloned()
            .ok_or(PictureError::NoSelection)
    }

    fn authorize(&self, actor: &Actor) -> Result<(), PictureError> {
        if self.policy.is_admin(actor) {
            Ok(())
        } else {
            warn!("Rejected admin command from user {}", actor.user_id);
            Err(PictureError::NotAllowed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockCatalogRepository, MockMediaLibrary};
    use crate::domain::entities::MetadataCatalog;
    use crate::domain::value_objects::ContentHash;
    use std::collections::HashSet;
    use std::sync::Mutex;

    const FILES: [&str; 3] = ["Alpha.jpg", "beta.png", "alphabet.gif"];

    fn path(name: &str) -> ImagePath {
        ImagePath::from_key(&format!("/pictures/{}", name))
    }

    fn admin() -> Actor {
        Actor::new(1, Some(100))
    }

    fn use_case_with(
        library: MockMediaLibrary,
        state: Arc<Mutex<MetadataCatalog>>,
    ) -> CatalogAdminUseCase {
        let mut repo = MockCatalogRepository::new();
        let load_state = Arc::clone(&state);
        repo.expect_load()
            .returning(move || load_state.lock().unwrap().clone());
        repo.expect_save().returning(move |c| {
            *state.lock().unwrap() = c.clone();
            Ok(())
        });

        CatalogAdminUseCase::new(
            Arc::new(library),
            ImageMetadataIndex::new(Arc::new(repo)),
            AccessPolicy::new(HashSet::from([1]), Some(100), HashSet::new()),
        )
    }

    fn listing_library() -> MockMediaLibrary {
        let mut library = MockMediaLibrary::new();
        library
            .expect_list_all()
            .returning(|| Ok(FILES.iter().map(|n| path(n)).collect()));
        library
    }

    #[tokio::test]
    async fn test_next_round_robin_wraps() {
        let uc = use_case_with(listing_library(), Arc::default());
        let mut session = ConfigSession::new();

        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(uc.next(&mut session, &admin()).await.unwrap().name);
        }

        assert_eq!(seen, vec!["Alpha.jpg", "beta.png", "alphabet.gif", "Alpha.jpg"]);
        assert_eq!(session.selection(admin().user_id), Some(&path("Alpha.jpg")));
    }

    #[tokio::test]
    async fn test_select_prefers_exact_match() {
        let uc = use_case_with(listing_library(), Arc::default());
        let mut session = ConfigSession::new();

        let exact = uc.select(&mut session, &admin(), "ALPHABET.GIF").await.unwrap();
        assert_eq!(exact.name, "alphabet.gif");

        let partial = uc.select(&mut session, &admin(), "alpha").await.unwrap();
        assert_eq!(partial.name, "Alpha.jpg");

        let err = uc.select(&mut session, &admin(), "zeta").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_edits_require_selection() {
        let uc = use_case_with(MockMediaLibrary::new(), Arc::default());
        let session = ConfigSession::new();

        let err = uc.set_rarity(&session, &admin(), "Rare").await.unwrap_err();
        assert!(matches!(err, PictureError::NoSelection));
    }

    #[tokio::test]
    async fn test_set_rarity_and_toggle_blacklist() {
        let state = Arc::new(Mutex::new(MetadataCatalog::default()));
        let uc = use_case_with(listing_library(), Arc::clone(&state));
        let mut session = ConfigSession::new();
        uc.select(&mut session, &admin(), "beta").await.unwrap();

        let rare = uc.set_rarity(&session, &admin(), "Rare").await.unwrap();
        assert_eq!(rare.rarity, Rarity::Rare);

        let banned = uc.toggle_blacklist(&session, &admin()).await.unwrap();
        assert!(banned.blacklisted);
        let unbanned = uc.toggle_blacklist(&session, &admin()).await.unwrap();
        assert!(!unbanned.blacklisted);

        let catalog = state.lock().unwrap().clone();
        assert_eq!(catalog.get(&path("beta.png")).unwrap().rarity(), Rarity::Rare);
    }

    #[tokio::test]
    async fn test_non_admin_is_rejected() {
        let uc = use_case_with(MockMediaLibrary::new(), Arc::default());
        let mut session = ConfigSession::new();

        let outsider = Actor::new(2, Some(100));
        assert!(matches!(
            uc.next(&mut session, &outsider).await,
            Err(PictureError::NotAllowed)
        ));

        let wrong_guild = Actor::new(1, Some(5));
        assert!(matches!(
            uc.toggle_blacklist(&session, &wrong_guild).await,
            Err(PictureError::NotAllowed)
        ));
    }

    #[tokio::test]
    async fn test_suggest_names() {
        let uc = use_case_with(listing_library(), Arc::default());

        assert_eq!(
            uc.suggest_names("ALPHA").await.unwrap(),
            vec!["Alpha.jpg", "alphabet.gif"]
        );
        assert_eq!(uc.suggest_names("  ").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_backfill_hashes_skips_indexed_files() {
        let state = Arc::new(Mutex::new(MetadataCatalog::default()));
        state.lock().unwrap().apply(
            &path("Alpha.jpg"),
            &RecordUpdate {
                content_hash: Some(ContentHash::compute(b"alpha")),
                ..Default::default()
            },
        );

        let mut library = listing_library();
        library
            .expect_hash_file()
            .times(2)
            .returning(|p| Ok(ContentHash::compute(p.file_name().as_bytes())));

        let uc = use_case_with(library, Arc::clone(&state));
        assert_eq!(uc.backfill_hashes(&admin()).await.unwrap(), 2);

        let catalog = state.lock().unwrap().clone();
        assert_eq!(catalog.hash_count(), 3);
        assert_eq!(
            catalog.find_by_hash(&ContentHash::compute(b"beta.png")),
            Some(path("beta.png"))
        );
    }
}
