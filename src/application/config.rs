use crate::domain::company::{CompanyConfig, CompanyProfile, DocumentNumber, DocumentSequence};
use crate::domain::ports::ConfigRepositoryBox;
use crate::error::Result;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Owns the company profile and the document sequence.
///
/// All reads and writes go through one mutex, held across each
/// read-modify-persist cycle, so concurrent callers can neither lose a profile
/// update nor receive the same document number.
pub struct CompanyConfigStore {
    repository: ConfigRepositoryBox,
    state: Mutex<CompanyConfig>,
}

impl CompanyConfigStore {
    /// Loads the persisted configuration, or the built-in defaults when
    /// nothing was persisted yet.
    pub async fn open(repository: ConfigRepositoryBox) -> Result<Self> {
        let config = match repository.load().await? {
            Some(config) => config,
            None => {
                debug!("no company configuration persisted, using defaults");
                CompanyConfig::default()
            }
        };

        Ok(Self {
            repository,
            state: Mutex::new(config),
        })
    }

    /// Writes the full in-memory state back to the repository.
    pub async fn save(&self) -> Result<()> {
        let state = self.state.lock().await;
        self.repository.save(&state).await
    }

    pub async fn profile(&self) -> CompanyProfile {
        self.state.lock().await.profile.clone()
    }

    pub async fn sequence(&self) -> DocumentSequence {
        self.state.lock().await.sequence.clone()
    }

    /// Replaces the whole profile and persists it. On a persistence failure
    /// the previous profile is restored.
    pub async fn set_profile(&self, profile: CompanyProfile) -> Result<()> {
        let mut state = self.state.lock().await;
        let previous = std::mem::replace(&mut state.profile, profile);

        if let Err(e) = self.repository.save(&state).await {
            warn!(error = %e, "company profile not persisted, keeping previous profile");
            state.profile = previous;
            return Err(e);
        }

        info!(company = %state.profile.name, "company profile updated");
        Ok(())
    }

    /// Advances the counter, persists it and returns the new number.
    ///
    /// The counter never moves backwards: if persisting fails the number is
    /// burnt and the error returned, so a later call cannot hand it out again.
    pub async fn next_document_number(&self) -> Result<DocumentNumber> {
        let mut state = self.state.lock().await;
        let number = state.sequence.advance();

        if let Err(e) = self.repository.save(&state).await {
            warn!(document = %number, error = %e, "document number burnt, sequence not persisted");
            return Err(e);
        }

        info!(document = %number, "document number issued");
        Ok(number)
    }

    pub async fn logo_path(&self) -> PathBuf {
        PathBuf::from(&self.state.lock().await.profile.logo_path)
    }

    pub async fn logo_exists(&self) -> bool {
        let path = self.logo_path().await;
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ConfigRepository;
    use crate::error::PayrollError;
    use crate::infrastructure::in_memory::InMemoryConfigRepository;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Delegates to an in-memory repository until told to fail.
    #[derive(Clone, Default)]
    struct FlakyRepository {
        inner: InMemoryConfigRepository,
        failing: Arc<AtomicBool>,
    }

    #[async_trait]
    impl ConfigRepository for FlakyRepository {
        async fn load(&self) -> Result<Option<CompanyConfig>> {
            self.inner.load().await
        }

        async fn save(&self, config: &CompanyConfig) -> Result<()> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(PayrollError::StorageError("disk full".to_string()));
            }
            self.inner.save(config).await
        }
    }

    #[tokio::test]
    async fn test_open_without_persisted_state_uses_defaults() {
        let store = CompanyConfigStore::open(Box::new(InMemoryConfigRepository::new()))
            .await
            .unwrap();
        assert_eq!(store.profile().await, CompanyProfile::default());
        assert_eq!(store.sequence().await, DocumentSequence::default());
    }

    #[tokio::test]
    async fn test_next_document_number_persists_immediately() {
        let repo = InMemoryConfigRepository::new();
        let store = CompanyConfigStore::open(Box::new(repo.clone()))
            .await
            .unwrap();

        assert_eq!(store.next_document_number().await.unwrap().as_str(), "BOL-000001");
        assert_eq!(store.next_document_number().await.unwrap().as_str(), "BOL-000002");

        let persisted = repo.load().await.unwrap().unwrap();
        assert_eq!(persisted.sequence.last_number, 2);
    }

    #[tokio::test]
    async fn test_set_profile_replaces_wholesale() {
        let repo = InMemoryConfigRepository::new();
        let store = CompanyConfigStore::open(Box::new(repo.clone()))
            .await
            .unwrap();

        let profile = CompanyProfile {
            name: "Ferretería Illimani".to_string(),
            slogan: String::new(),
            ..CompanyProfile::default()
        };
        store.set_profile(profile.clone()).await.unwrap();

        assert_eq!(store.profile().await, profile);
        assert_eq!(repo.load().await.unwrap().unwrap().profile, profile);
    }

    #[tokio::test]
    async fn test_set_profile_failure_keeps_previous() {
        let repo = FlakyRepository::default();
        let store = CompanyConfigStore::open(Box::new(repo.clone()))
            .await
            .unwrap();

        repo.failing.store(true, Ordering::SeqCst);
        let result = store
            .set_profile(CompanyProfile {
                name: "Otra".to_string(),
                ..CompanyProfile::default()
            })
            .await;

        assert!(matches!(result, Err(PayrollError::StorageError(_))));
        assert_eq!(store.profile().await, CompanyProfile::default());
    }

    #[tokio::test]
    async fn test_failed_persist_burns_the_number() {
        let repo = FlakyRepository::default();
        let store = CompanyConfigStore::open(Box::new(repo.clone()))
            .await
            .unwrap();

        repo.failing.store(true, Ordering::SeqCst);
        assert!(store.next_document_number().await.is_err());

        repo.failing.store(false, Ordering::SeqCst);
        assert_eq!(store.next_document_number().await.unwrap().as_str(), "BOL-000002");
    }

    #[tokio::test]
    async fn test_concurrent_callers_get_distinct_numbers() {
        let store = Arc::new(
            CompanyConfigStore::open(Box::new(InMemoryConfigRepository::new()))
                .await
                .unwrap(),
        );

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.next_document_number().await.unwrap() })
            })
            .collect();

        let mut numbers = Vec::new();
        for handle in handles {
            numbers.push(handle.await.unwrap());
        }
        numbers.sort();
        numbers.dedup();
        assert_eq!(numbers.len(), 50);
        assert_eq!(store.sequence().await.last_number, 50);
    }

    #[tokio::test]
    async fn test_logo_exists() {
        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("logo.png");
        let store = CompanyConfigStore::open(Box::new(InMemoryConfigRepository::new()))
            .await
            .unwrap();
        store
            .set_profile(CompanyProfile {
                logo_path: logo.display().to_string(),
                ..CompanyProfile::default()
            })
            .await
            .unwrap();

        assert!(!store.logo_exists().await);
        std::fs::write(&logo, b"png").unwrap();
        assert!(store.logo_exists().await);
        assert_eq!(store.logo_path().await, logo);
    }
}
