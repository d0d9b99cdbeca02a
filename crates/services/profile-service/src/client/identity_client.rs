//! gRPC client for identity-service.

use async_trait::async_trait;
use tonic::transport::Channel;
use tracing::debug;

use common::{AppError, AppResult, GrpcClientConfig, IdentityStore};
use domain::UserId;
use proto::identity::{
    identity_service_client::IdentityServiceClient as ProtoIdentityServiceClient,
    DeleteAccountRequest,
};

/// Identity store reached over gRPC.
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
        // NOT_FOUND maps to AppError::NotFound, which callers treat specially
        client.delete_account(request).await.map_err(AppError::from)?;
        Ok(())
    }
}
