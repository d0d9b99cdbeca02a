//! Caller authentication middleware.
//!
//! A valid bearer token attaches a [`CurrentUser`] to the request. A missing,
//! malformed or rejected token leaves the request anonymous; handlers decide
//! whether an identity is required.

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use tracing::{debug, warn};

use common::AppResult;
use domain::UserId;

use crate::state::AppState;

#[cfg(test)]
use mockall::automock;

/// Verified identity of the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub uid: UserId,
    pub email: Option<String>,
}

/// Verifies bearer tokens.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// `Ok(None)` when the token is not valid.
    async fn verify(&self, token: &str) -> AppResult<Option<CurrentUser>>;
}

/// Authentication middleware that resolves the caller from the bearer token.
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if let Some(TypedHeader(Authorization(bearer))) = bearer {
        match state.verifier.verify(bearer.token()).await {
            Ok(Some(current_user)) => {
                debug!(uid = %current_user.uid, "Caller authenticated");
                request.extensions_mut().insert(current_user);
            }
            Ok(None) => debug!("Bearer token rejected"),
            Err(e) => warn!("Token verification failed: {}", e),
        }
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{http::StatusCode, middleware, routing::get, Extension, Router};
    use tower::ServiceExt;

    use common::{InMemoryIdentityStore, InMemoryProfileStore};

    use crate::config::GatewayConfig;

    async fn whoami(caller: Option<Extension<CurrentUser>>) -> String {
        caller
            .map(|Extension(user)| user.uid.to_string())
            .unwrap_or_else(|| "anonymous".to_string())
    }

    fn app(verifier: MockTokenVerifier) -> Router {
        let state = AppState::new(
            Arc::new(InMemoryIdentityStore::new()),
            Arc::new(InMemoryProfileStore::new()),
            Arc::new(verifier),
            None,
            GatewayConfig::default(),
        );

        Router::new()
            .route("/whoami", get(whoami))
            .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
            .with_state(state)
    }

    async fn call(app: Router, authorization: Option<&str>) -> String {
        let mut builder = Request::builder().uri("/whoami");
        if let Some(value) = authorization {
            builder = builder.header("Authorization", value);
        }

        let response = app
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_valid_token_attaches_caller() {
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .withf(|token| token == "good")
            .times(1)
            .returning(|_| {
                Ok(Some(CurrentUser {
                    uid: UserId::parse("caller-1").unwrap(),
                    email: None,
                }))
            });

        assert_eq!(call(app(verifier), Some("Bearer good")).await, "caller-1");
    }

    #[tokio::test]
    async fn test_missing_header_skips_verification() {
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify().never();

        assert_eq!(call(app(verifier), None).await, "anonymous");
    }

    #[tokio::test]
    async fn test_rejected_or_failed_verification_stays_anonymous() {
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify().times(1).returning(|_| Ok(None));
        assert_eq!(call(app(verifier), Some("Bearer bad")).await, "anonymous");

        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .times(1)
            .returning(|_| Err(common::AppError::service_unavailable("identity-service")));
        assert_eq!(call(app(verifier), Some("Bearer any")).await, "anonymous");
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_is_ignored() {
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify().never();

        assert_eq!(call(app(verifier), Some("Basic dXNlcjpwYXNz")).await, "anonymous");
    }
}
