//! Router-level tests for `POST /deleteUser`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{AppResult, InMemoryIdentityStore, InMemoryProfileStore};
use domain::{AuthRecord, ProfileDocument, UserId};
use gateway_lib::config::GatewayConfig;
use gateway_lib::middleware::{CurrentUser, TokenVerifier};
use gateway_lib::routes::create_router;
use gateway_lib::state::AppState;

const ADMIN_TOKEN: &str = "admin-token";

/// Accepts exactly one token, issued to `adminUid`.
struct StaticVerifier;

#[async_trait]
impl TokenVerifier for StaticVerifier {
    async fn verify(&self, token: &str) -> AppResult<Option<CurrentUser>> {
        if token != ADMIN_TOKEN {
            return Ok(None);
        }
        Ok(Some(CurrentUser {
            uid: UserId::parse("adminUid")?,
            email: None,
        }))
    }
}

struct Harness {
    identity: Arc<InMemoryIdentityStore>,
    profiles: Arc<InMemoryProfileStore>,
    app: Router,
}

fn uid(raw: &str) -> UserId {
    UserId::parse(raw).unwrap()
}

fn harness() -> Harness {
    let identity = Arc::new(InMemoryIdentityStore::new());
    let profiles = Arc::new(InMemoryProfileStore::new());
    let state = AppState::new(
        identity.clone(),
        profiles.clone(),
        Arc::new(StaticVerifier),
        None,
        GatewayConfig::default(),
    );

    Harness {
        identity,
        profiles,
        app: create_router(state),
    }
}

async fn post(app: Router, token: Option<&str>, body: &str) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/deleteUser")
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    let response = app
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn anonymous_caller_gets_unauthenticated_for_any_payload() {
    for body in [r#"{"uid":"u123"}"#, "{}", "", "garbage"] {
        let h = harness();
        h.identity.insert(AuthRecord::new(uid("u123")));

        let (status, json) = post(h.app, None, body).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"]["code"], "unauthenticated");
        assert!(h.identity.contains(&uid("u123")));
        assert_eq!(h.identity.delete_calls(), 0);
    }
}

#[tokio::test]
async fn rejected_token_counts_as_anonymous() {
    let h = harness();
    let (status, json) = post(h.app, Some("forged"), r#"{"uid":"u123"}"#).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["code"], "unauthenticated");
}

#[tokio::test]
async fn empty_or_absent_uid_is_invalid_argument() {
    for body in [r#"{"uid":""}"#, "{}", r#"{"uid":null}"#, ""] {
        let h = harness();
        let (status, json) = post(h.app, Some(ADMIN_TOKEN), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(json["error"]["code"], "invalid-argument");
        assert_eq!(h.identity.delete_calls(), 0);
    }
}

#[tokio::test]
async fn unknown_account_is_internal_and_profile_survives() {
    let h = harness();
    h.profiles.insert(ProfileDocument::new(uid("ghost")));

    let (status, json) = post(h.app, Some(ADMIN_TOKEN), r#"{"uid":"ghost"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "internal");
    assert_eq!(
        json["error"]["message"],
        "Failed to delete user: Account ghost not found"
    );
    assert!(h.profiles.contains(&uid("ghost")));
}

#[tokio::test]
async fn unreachable_identity_store_is_internal() {
    let h = harness();
    h.identity.insert(AuthRecord::new(uid("u1")));
    h.identity.set_unavailable(Some("identity-service"));

    let (status, json) = post(h.app, Some(ADMIN_TOKEN), r#"{"uid":"u1"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "internal");
    assert_eq!(h.profiles.delete_calls(), 0);
}

#[tokio::test]
async fn authenticated_deletion_clears_both_stores() {
    let h = harness();
    h.identity.insert(AuthRecord::new(uid("u123")));
    h.profiles.insert(ProfileDocument::new(uid("u123")));

    let (status, json) = post(h.app, Some(ADMIN_TOKEN), r#"{"uid":"u123"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({ "success": true, "message": "User u123 deleted successfully." })
    );
    assert!(!h.identity.contains(&uid("u123")));
    assert!(!h.profiles.contains(&uid("u123")));
}

#[tokio::test]
async fn health_reports_redis_disabled() {
    let h = harness();
    let response = h
        .app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["services"]["redis"]["status"], "disabled");
}
