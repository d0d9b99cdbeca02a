//! Ports to the two stores that hold a user's identity.
//!
//! Components receive these as explicit `Arc<dyn ...>` dependencies so that
//! the gRPC clients used in production can be swapped for the in-memory
//! stores below.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use domain::{AuthRecord, ProfileDocument, UserId};

use crate::error::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Identity store: authentication accounts keyed by user id.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Delete the account for `uid`.
    ///
    /// Returns `AppError::NotFound` when no such account exists; every other
    /// failure uses a different variant.
    async fn delete_account(&self, uid: &UserId) -> AppResult<()>;
}

/// Document store: one profile document per user id.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Delete the profile document for `uid`. Deleting an absent document succeeds.
    async fn delete_profile(&self, uid: &UserId) -> AppResult<()>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// =============================================================================
// In-memory identity store
// =============================================================================

/// Process-local identity store.
#[derive(Default)]
pub struct InMemoryIdentityStore {
    accounts: Mutex<HashMap<UserId, AuthRecord>>,
    unavailable: Mutex<Option<String>>,
    delete_calls: Mutex<usize>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: AuthRecord) {
        lock(&self.accounts).insert(record.uid.clone(), record);
    }

    pub fn contains(&self, uid: &UserId) -> bool {
        lock(&self.accounts).contains_key(uid)
    }

    pub fn len(&self) -> usize {
        lock(&self.accounts).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `delete_account` calls seen so far.
    pub fn delete_calls(&self) -> usize {
        *lock(&self.delete_calls)
    }

    /// Make every subsequent delete fail as if the store were unreachable.
    pub fn set_unavailable(&self, reason: Option<&str>) {
        *lock(&self.unavailable) = reason.map(str::to_string);
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn delete_account(&self, uid: &UserId) -> AppResult<()> {
        *lock(&self.delete_calls) += 1;

        if let Some(reason) = lock(&self.unavailable).clone() {
            return Err(AppError::service_unavailable(reason));
        }

        match lock(&self.accounts).remove(uid) {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!("Account {}", uid))),
        }
    }
}

// =============================================================================
// In-memory profile store
// =============================================================================

/// Process-local document store without deletion events.
#[derive(Default)]
pub struct InMemoryProfileStore {
    documents: Mutex<HashMap<UserId, ProfileDocument>>,
    delete_calls: Mutex<usize>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, document: ProfileDocument) {
        lock(&self.documents).insert(document.uid.clone(), document);
    }

    pub fn contains(&self, uid: &UserId) -> bool {
        lock(&self.documents).contains_key(uid)
    }

    /// Number of `delete_profile` calls seen so far.
    pub fn delete_calls(&self) -> usize {
        *lock(&self.delete_calls)
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn delete_profile(&self, uid: &UserId) -> AppResult<()> {
        *lock(&self.delete_calls) += 1;
        lock(&self.documents).remove(uid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(raw: &str) -> UserId {
        UserId::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn test_identity_delete_is_not_found_when_absent() {
        let store = InMemoryIdentityStore::new();
        store.insert(AuthRecord::new(uid("u123")));

        assert!(store.delete_account(&uid("u123")).await.is_ok());
        assert!(!store.contains(&uid("u123")));

        let err = store.delete_account(&uid("u123")).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.delete_calls(), 2);
    }

    #[tokio::test]
    async fn test_identity_unavailable_is_distinct_from_not_found() {
        let store = InMemoryIdentityStore::new();
        store.insert(AuthRecord::new(uid("u1")));
        store.set_unavailable(Some("identity-service"));

        let err = store.delete_account(&uid("u1")).await.unwrap_err();
        assert!(!err.is_not_found());
        assert!(store.contains(&uid("u1")));
    }

    #[tokio::test]
    async fn test_profile_delete_is_silent_when_absent() {
        let store = InMemoryProfileStore::new();
        store.insert(ProfileDocument::new(uid("u1")));

        assert!(store.delete_profile(&uid("u1")).await.is_ok());
        assert!(store.delete_profile(&uid("u1")).await.is_ok());
        assert!(!store.contains(&uid("u1")));
    }
}
