//! Profile service - Owns the `usuarios` profile documents.
//!
//! Deleting a document that exists emits exactly one `ProfileDeleted` event;
//! deleting an absent document is a silent no-op and emits nothing.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use common::{AppResult, OptionExt, ProfileStore};
use domain::{document_path, ProfileDeleted, ProfileDocument, UserId};

use crate::repository::ProfileRepository;
use crate::trigger::EventDispatcher;

/// Profile service trait for dependency injection.
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Get profile document by user id
    async fn get_profile(&self, uid: &UserId) -> AppResult<ProfileDocument>;

    /// Create a profile document (registration tooling and seeding)
    async fn create_profile(&self, document: ProfileDocument) -> AppResult<ProfileDocument>;

    /// Delete a profile document; returns whether it existed
    async fn delete_profile(&self, uid: &UserId) -> AppResult<bool>;
}

/// Concrete implementation of ProfileService using repository.
pub struct ProfileManager {
    repo: Arc<dyn ProfileRepository>,
    dispatcher: Arc<dyn EventDispatcher>,
}

impl ProfileManager {
    /// Create new profile service; `dispatcher` receives deletion events.
    pub fn new(repo: Arc<dyn ProfileRepository>, dispatcher: Arc<dyn EventDispatcher>) -> Self {
        Self { repo, dispatcher }
    }
}

#[async_trait]
impl ProfileService for ProfileManager {
    async fn get_profile(&self, uid: &UserId) -> AppResult<ProfileDocument> {
        self.repo
            .find(uid)
            .await?
            .ok_or_not_found(format!("Profile {}", document_path(uid)))
    }

    async fn create_profile(&self, document: ProfileDocument) -> AppResult<ProfileDocument> {
        let document = self.repo.insert(document).await?;
        info!(path = %document.path(), "Profile document created");
        Ok(document)
    }

    async fn delete_profile(&self, uid: &UserId) -> AppResult<bool> {
        let existed = self.repo.delete(uid).await?;

        if existed {
            info!(path = %document_path(uid), "Profile document deleted");
            self.dispatcher.dispatch(ProfileDeleted::new(uid.clone()));
        } else {
            debug!(path = %document_path(uid), "Profile document absent, nothing deleted");
        }

        Ok(existed)
    }
}

#[async_trait]
impl ProfileStore for ProfileManager {
    async fn delete_profile(&self, uid: &UserId) -> AppResult<()> {
        ProfileService::delete_profile(self, uid).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use common::AppError;

    use crate::repository::{InMemoryProfileRepository, MockProfileRepository};

    #[derive(Default)]
    struct RecordingDispatcher {
        events: Mutex<Vec<ProfileDeleted>>,
    }

    impl RecordingDispatcher {
        fn uids(&self) -> Vec<String> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .map(|e| e.uid.to_string())
                .collect()
        }
    }

    impl EventDispatcher for RecordingDispatcher {
        fn dispatch(&self, event: ProfileDeleted) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn uid(raw: &str) -> UserId {
        UserId::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn test_delete_existing_emits_one_event() {
        let repo = Arc::new(InMemoryProfileRepository::new());
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let service = ProfileManager::new(repo, dispatcher.clone());

        service
            .create_profile(ProfileDocument::new(uid("u456")).with_name("Ana"))
            .await
            .unwrap();

        let existed = ProfileService::delete_profile(&service, &uid("u456"))
            .await
            .unwrap();

        assert!(existed);
        assert_eq!(dispatcher.uids(), vec!["u456"]);
        assert!(service.get_profile(&uid("u456")).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_absent_is_silent_and_emits_nothing() {
        let repo = Arc::new(InMemoryProfileRepository::new());
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let service = ProfileManager::new(repo, dispatcher.clone());

        assert!(ProfileStore::delete_profile(&service, &uid("ghost")).await.is_ok());
        assert!(dispatcher.uids().is_empty());
    }

    #[tokio::test]
    async fn test_repository_failure_emits_nothing() {
        let mut repo = MockProfileRepository::new();
        repo.expect_delete()
            .times(1)
            .returning(|_| Err(AppError::internal("connection reset")));

        let dispatcher = Arc::new(RecordingDispatcher::default());
        let service = ProfileManager::new(Arc::new(repo), dispatcher.clone());

        assert!(ProfileStore::delete_profile(&service, &uid("u1")).await.is_err());
        assert!(dispatcher.uids().is_empty());
    }

    #[tokio::test]
    async fn test_create_duplicate_conflicts() {
        let repo = Arc::new(InMemoryProfileRepository::new());
        let service = ProfileManager::new(repo, Arc::new(RecordingDispatcher::default()));

        service.create_profile(ProfileDocument::new(uid("u1"))).await.unwrap();
        let err = service
            .create_profile(ProfileDocument::new(uid("u1")))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }
}
