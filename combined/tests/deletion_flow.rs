//! End-to-end deletion flow across the gateway endpoint, the profile store
//! and its deletion trigger, with an in-process identity store.

use std::sync::Arc;

use common::InMemoryIdentityStore;
use domain::{AuthRecord, DeletionOutcome, ProfileDocument, UserId};
use gateway_lib::handlers::{DeleteUserRequest, UserDeletionEndpoint};
use gateway_lib::middleware::CurrentUser;
use profile_service_lib::repository::InMemoryProfileRepository;
use profile_service_lib::service::ProfileService;
use profile_service_lib::trigger::DeletionPropagator;
use profile_service_lib::{build_pipeline, ProfilePipeline};

fn uid(raw: &str) -> UserId {
    UserId::parse(raw).unwrap()
}

async fn seeded(raw: &str) -> (Arc<InMemoryIdentityStore>, ProfilePipeline) {
    let identity = Arc::new(InMemoryIdentityStore::new());
    identity.insert(AuthRecord::new(uid(raw)).with_email(format!("{raw}@example.com")));

    let pipeline = build_pipeline(Arc::new(InMemoryProfileRepository::new()), identity.clone());
    pipeline
        .service
        .create_profile(ProfileDocument::new(uid(raw)).with_name("Seeded"))
        .await
        .unwrap();

    (identity, pipeline)
}

#[tokio::test]
async fn endpoint_deletion_converges_both_stores() {
    let (identity, pipeline) = seeded("u123").await;
    let endpoint = UserDeletionEndpoint::new(identity.clone(), pipeline.service.clone());
    let caller = CurrentUser {
        uid: uid("adminUid"),
        email: None,
    };

    let response = endpoint
        .handle(Some(&caller), Some(DeleteUserRequest::new("u123")))
        .await
        .unwrap();
    pipeline.dispatcher.wait_idle().await;

    assert!(response.success);
    assert!(response.message.contains("u123"));
    assert!(!identity.contains(&uid("u123")));
    assert!(pipeline.service.get_profile(&uid("u123")).await.unwrap_err().is_not_found());
    // Endpoint delete plus the trigger's no-op delete
    assert_eq!(identity.delete_calls(), 2);
}

#[tokio::test]
async fn direct_profile_deletion_removes_account_and_repeat_is_a_no_op() {
    let (identity, pipeline) = seeded("u456").await;

    let existed = pipeline.service.delete_profile(&uid("u456")).await.unwrap();
    pipeline.dispatcher.wait_idle().await;

    assert!(existed);
    assert!(!identity.contains(&uid("u456")));

    let outcome = DeletionPropagator::new(identity.clone())
        .propagate(&uid("u456"))
        .await;
    assert_eq!(outcome, DeletionOutcome::AlreadyAbsent);
    assert!(identity.is_empty());
}

#[tokio::test]
async fn deleting_absent_profile_fires_nothing() {
    let (identity, pipeline) = seeded("u789").await;

    let existed = pipeline.service.delete_profile(&uid("someone-else")).await.unwrap();
    pipeline.dispatcher.wait_idle().await;

    assert!(!existed);
    assert!(identity.contains(&uid("u789")));
    assert_eq!(identity.delete_calls(), 0);
}
