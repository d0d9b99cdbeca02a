//! User deletion endpoint.
//!
//! Removes a user's account from the identity store first and their profile
//! document second. A failed account deletion stops the request before the
//! profile is touched. The profile deletion fires the deletion trigger, which
//! then finds the account already gone.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, State},
    response::Json,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;
use validator::Validate;

use common::{IdentityStore, ProfileStore};
use domain::UserId;

use crate::error::{CallableError, CallableErrorResponse};
use crate::middleware::CurrentUser;
use crate::state::AppState;

const UID_REQUIRED: &str = "The uid of the user to delete is required.";

/// Delete user request with validation
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct DeleteUserRequest {
    /// Id of the user to delete
    #[validate(
        required(message = "The uid of the user to delete is required."),
        length(min = 1, message = "The uid of the user to delete is required.")
    )]
    #[schema(example = "u123")]
    pub uid: Option<String>,
}

impl DeleteUserRequest {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
        }
    }

    /// Parse a JSON body. Anything that is not a JSON object yields `None`.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }
}

/// Delete user response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct DeleteUserResponse {
    pub success: bool,
    #[schema(example = "User u123 deleted successfully.")]
    pub message: String,
}

/// Deletes a user from both stores on behalf of an authenticated caller.
pub struct UserDeletionEndpoint {
    identity: Arc<dyn IdentityStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl UserDeletionEndpoint {
    pub fn new(identity: Arc<dyn IdentityStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { identity, profiles }
    }

    /// Run one deletion request.
    ///
    /// Authentication is checked before the payload, so an anonymous caller
    /// is rejected whatever it sent.
    pub async fn handle(
        &self,
        caller: Option<&CurrentUser>,
        request: Option<DeleteUserRequest>,
    ) -> Result<DeleteUserResponse, CallableError> {
        let caller = caller.ok_or(CallableError::Unauthenticated)?;
        let uid = validate_uid(request)?;

        info!(uid = %uid, caller = %caller.uid, "User deletion requested");

        if let Err(e) = self.identity.delete_account(&uid).await {
            error!(uid = %uid, error = %e, "Failed to delete account");
            return Err(CallableError::Internal(format!("Failed to delete user: {}", e)));
        }
        info!(uid = %uid, "Account removed from the identity store");

        if let Err(e) = self.profiles.delete_profile(&uid).await {
            error!(uid = %uid, error = %e, "Failed to delete profile document");
            return Err(CallableError::Internal(format!("Failed to delete user: {}", e)));
        }
        info!(path = %domain::document_path(&uid), "Profile document removed");

        Ok(DeleteUserResponse {
            success: true,
            message: format!("User {} deleted successfully.", uid),
        })
    }
}

fn validate_uid(request: Option<DeleteUserRequest>) -> Result<UserId, CallableError> {
    let request = request.unwrap_or_default();

    request.validate().map_err(|e| {
        let message = e
            .field_errors()
            .values()
            .next()
            .and_then(|errors| errors.first())
            .and_then(|error| error.message.as_ref())
            .map(|msg| msg.to_string())
            .unwrap_or_else(|| UID_REQUIRED.to_string());
        CallableError::InvalidArgument(message)
    })?;

    request
        .uid
        .ok_or_else(|| CallableError::InvalidArgument(UID_REQUIRED.to_string()))
        .and_then(|raw| {
            UserId::parse(raw).map_err(|_| CallableError::InvalidArgument(UID_REQUIRED.to_string()))
        })
}

/// Create deletion routes
pub fn deletion_routes() -> Router<AppState> {
    Router::new().route("/deleteUser", post(delete_user))
}

/// Delete a user's account and profile document
#[utoipa::path(
    post,
    path = "/deleteUser",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = DeleteUserRequest,
    responses(
        (status = 200, description = "User deleted from both stores", body = DeleteUserResponse),
        (status = 400, description = "Missing or empty uid", body = CallableErrorResponse),
        (status = 401, description = "Caller is not authenticated", body = CallableErrorResponse),
        (status = 500, description = "A store rejected the deletion", body = CallableErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    caller: Option<Extension<CurrentUser>>,
    body: Bytes,
) -> Result<Json<DeleteUserResponse>, CallableError> {
    let endpoint = UserDeletionEndpoint::new(state.identity.clone(), state.profiles.clone());
    let caller = caller.as_ref().map(|Extension(user)| user);

    endpoint
        .handle(caller, DeleteUserRequest::from_body(&body))
        .await
        .map(Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{AppError, InMemoryIdentityStore, InMemoryProfileStore, MockIdentityStore, MockProfileStore};
    use domain::{AuthRecord, ProfileDocument};

    fn uid(raw: &str) -> UserId {
        UserId::parse(raw).unwrap()
    }

    fn admin() -> CurrentUser {
        CurrentUser {
            uid: uid("adminUid"),
            email: Some("admin@example.com".to_string()),
        }
    }

    fn untouched_stores() -> UserDeletionEndpoint {
        let mut identity = MockIdentityStore::new();
        identity.expect_delete_account().never();
        let mut profiles = MockProfileStore::new();
        profiles.expect_delete_profile().never();
        UserDeletionEndpoint::new(Arc::new(identity), Arc::new(profiles))
    }

    #[tokio::test]
    async fn test_anonymous_caller_is_rejected_whatever_the_payload() {
        let endpoint = untouched_stores();

        for request in [None, Some(DeleteUserRequest::default()), Some(DeleteUserRequest::new("u123"))] {
            let err = endpoint.handle(None, request).await.unwrap_err();
            assert_eq!(err, CallableError::Unauthenticated);
        }
    }

    #[tokio::test]
    async fn test_missing_or_empty_uid_is_invalid_argument() {
        let endpoint = untouched_stores();

        for request in [None, Some(DeleteUserRequest::default()), Some(DeleteUserRequest::new(""))] {
            let err = endpoint.handle(Some(&admin()), request).await.unwrap_err();
            assert_eq!(err.code(), "invalid-argument");
            assert_eq!(err.to_string(), UID_REQUIRED);
        }
    }

    #[tokio::test]
    async fn test_deletes_from_both_stores() {
        let identity = Arc::new(InMemoryIdentityStore::new());
        identity.insert(AuthRecord::new(uid("u123")));
        let profiles = Arc::new(InMemoryProfileStore::new());
        profiles.insert(ProfileDocument::new(uid("u123")));

        let endpoint = UserDeletionEndpoint::new(identity.clone(), profiles.clone());
        let response = endpoint
            .handle(Some(&admin()), Some(DeleteUserRequest::new("u123")))
            .await
            .unwrap();

        assert!(response.success);
        assert!(response.message.contains("u123"));
        assert!(!identity.contains(&uid("u123")));
        assert!(!profiles.contains(&uid("u123")));
    }

    #[tokio::test]
    async fn test_absent_account_fails_and_leaves_profile() {
        let identity = Arc::new(InMemoryIdentityStore::new());
        let profiles = Arc::new(InMemoryProfileStore::new());
        profiles.insert(ProfileDocument::new(uid("u9")));

        let endpoint = UserDeletionEndpoint::new(identity, profiles.clone());
        let err = endpoint
            .handle(Some(&admin()), Some(DeleteUserRequest::new("u9")))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "internal");
        assert_eq!(err.to_string(), "Failed to delete user: Account u9 not found");
        assert!(profiles.contains(&uid("u9")));
        assert_eq!(profiles.delete_calls(), 0);
    }

    #[tokio::test]
    async fn test_profile_failure_is_internal() {
        let mut identity = MockIdentityStore::new();
        identity.expect_delete_account().times(1).returning(|_| Ok(()));
        let mut profiles = MockProfileStore::new();
        profiles
            .expect_delete_profile()
            .withf(|id| id.as_str() == "u5")
            .times(1)
            .returning(|_| Err(AppError::service_unavailable("profile-service")));

        let endpoint = UserDeletionEndpoint::new(Arc::new(identity), Arc::new(profiles));
        let err = endpoint
            .handle(Some(&admin()), Some(DeleteUserRequest::new("u5")))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CallableError::Internal("Failed to delete user: Service profile-service is unavailable".into())
        );
    }

    #[test]
    fn test_body_parsing_is_lenient() {
        assert!(DeleteUserRequest::from_body(b"").is_none());
        assert!(DeleteUserRequest::from_body(b"not json").is_none());
        assert_eq!(
            DeleteUserRequest::from_body(br#"{"uid":"u1"}"#).and_then(|r| r.uid),
            Some("u1".to_string())
        );
        assert_eq!(DeleteUserRequest::from_body(b"{}").map(|r| r.uid), Some(None));
    }
}
