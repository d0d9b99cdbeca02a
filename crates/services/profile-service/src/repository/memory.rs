//! In-memory profile repository for tests and local runs.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::ProfileRepository;
use common::{AppError, AppResult};
use domain::{ProfileDocument, UserId};

/// Profile documents kept in a process-local map.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    documents: Mutex<HashMap<UserId, ProfileDocument>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn documents(&self) -> std::sync::MutexGuard<'_, HashMap<UserId, ProfileDocument>> {
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find(&self, uid: &UserId) -> AppResult<Option<ProfileDocument>> {
        Ok(self.documents().get(uid).cloned())
    }

    async fn insert(&self, document: ProfileDocument) -> AppResult<ProfileDocument> {
        let mut documents = self.documents();
        if documents.contains_key(&document.uid) {
            return Err(AppError::conflict(format!("Profile {}", document.path())));
        }
        documents.insert(document.uid.clone(), document.clone());
        Ok(document)
    }

    async fn delete(&self, uid: &UserId) -> AppResult<bool> {
        Ok(self.documents().remove(uid).is_some())
    }
}
