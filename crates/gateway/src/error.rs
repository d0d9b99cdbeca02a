//! Errors reported by callable endpoints.
//!
//! Rendered as `{"error": {"code": ..., "message": ...}}` with one of the
//! callable codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use domain::{CODE_INTERNAL, CODE_INVALID_ARGUMENT, CODE_UNAUTHENTICATED};

/// Failure of a callable endpoint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallableError {
    #[error("The caller must be signed in to call this function.")]
    Unauthenticated,

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct CallableErrorResponse {
    pub error: CallableErrorBody,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CallableErrorBody {
    /// One of `unauthenticated`, `invalid-argument`, `internal`
    #[schema(example = "invalid-argument")]
    pub code: String,
    pub message: String,
}

impl CallableError {
    pub fn code(&self) -> &'static str {
        match self {
            CallableError::Unauthenticated => CODE_UNAUTHENTICATED,
            CallableError::InvalidArgument(_) => CODE_INVALID_ARGUMENT,
            CallableError::Internal(_) => CODE_INTERNAL,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CallableError::Unauthenticated => StatusCode::UNAUTHORIZED,
            CallableError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            CallableError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CallableError {
    fn into_response(self) -> Response {
        let body = CallableErrorResponse {
            error: CallableErrorBody {
                code: self.code().to_string(),
                message: self.to_string(),
            },
        };

        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_statuses() {
        let cases = [
            (CallableError::Unauthenticated, "unauthenticated", 401),
            (CallableError::InvalidArgument("x".into()), "invalid-argument", 400),
            (CallableError::Internal("x".into()), "internal", 500),
        ];

        for (err, code, status) in cases {
            assert_eq!(err.code(), code);
            assert_eq!(err.status().as_u16(), status);
        }
    }

    #[tokio::test]
    async fn test_body_shape() {
        let response = CallableError::Internal("Failed to delete user: boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"]["code"], "internal");
        assert_eq!(json["error"]["message"], "Failed to delete user: boom");
    }
}
