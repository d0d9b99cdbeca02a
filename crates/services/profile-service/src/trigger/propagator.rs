//! Deletion propagator: removes the identity-store account of a user whose
//! profile document was deleted.
//!
//! The propagator never fails. An account that is already gone counts as
//! done; any other failure is logged and dropped without retry.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use common::IdentityStore;
use domain::{DeletionOutcome, ProfileDeleted, UserId};

use super::dispatcher::ProfileDeletedHandler;

/// Reaction to `usuarios/{uid}` deletions.
pub struct DeletionPropagator {
    identity: Arc<dyn IdentityStore>,
}

impl DeletionPropagator {
    pub fn new(identity: Arc<dyn IdentityStore>) -> Self {
        Self { identity }
    }

    /// Delete the account for `uid` from the identity store.
    pub async fn propagate(&self, uid: &UserId) -> DeletionOutcome {
        info!(uid = %uid, "Deleting account from the identity store");

        match self.identity.delete_account(uid).await {
            Ok(()) => {
                info!(uid = %uid, "Account removed from the identity store");
                DeletionOutcome::Deleted
            }
            Err(e) if e.is_not_found() => {
                info!(uid = %uid, "Account not found in the identity store (already deleted?)");
                DeletionOutcome::AlreadyAbsent
            }
            Err(e) => {
                error!(uid = %uid, error = %e, "Failed to remove account from the identity store");
                DeletionOutcome::Failed(e.to_string())
            }
        }
    }
}

#[async_trait]
impl ProfileDeletedHandler for DeletionPropagator {
    async fn on_profile_deleted(&self, event: ProfileDeleted) -> DeletionOutcome {
        self.propagate(&event.uid).await
    }
}
