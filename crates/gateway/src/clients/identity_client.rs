//! gRPC client for identity-service.

use async_trait::async_trait;
use tonic::transport::Channel;
use tracing::debug;

use common::{AppError, AppResult, GrpcClientConfig, IdentityStore};
use domain::UserId;
use proto::identity::{
    identity_service_client::IdentityServiceClient as ProtoIdentityServiceClient,
    DeleteAccountRequest, VerifyTokenRequest,
};

use crate::middleware::{CurrentUser, TokenVerifier};

/// gRPC client wrapper for identity-service.
pub struct IdentityClient {
    client: ProtoIdentityServiceClient<Channel>,
}

impl IdentityClient {
    /// Create a client; the connection is established on first call.
    pub fn connect_lazy(config: &GrpcClientConfig) -> Result<Self, tonic::transport::Error> {
        debug!("Using identity-service at {}", config.endpoint);
        let client = ProtoIdentityServiceClient::new(config.lazy_channel()?);
        Ok(Self { client })
    }
}

#[async_trait]
impl IdentityStore for IdentityClient {
    async fn delete_account(&self, uid: &UserId) -> AppResult<()> {
        let request = tonic::Request::new(DeleteAccountRequest {
            uid: uid.to_string(),
        });

        let mut client = self.client.clone();
        client.delete_account(request).await.map_err(AppError::from)?;
        Ok(())
    }
}

#[async_trait]
impl TokenVerifier for IdentityClient {
    async fn verify(&self, token: &str) -> AppResult<Option<CurrentUser>> {
        let request = tonic::Request::new(VerifyTokenRequest {
            token: token.to_string(),
        });

        let mut client = self.client.clone();
        let response = client.verify_token(request).await.map_err(AppError::from)?;
        let proto = response.into_inner();

        if !proto.valid {
            return Ok(None);
        }

        Ok(Some(CurrentUser {
            uid: UserId::parse(proto.uid)?,
            email: proto.email,
        }))
    }
}
