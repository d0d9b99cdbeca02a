//! gRPC client for profile-service.

use async_trait::async_trait;
use tonic::transport::Channel;
use tracing::debug;

use common::{AppError, AppResult, GrpcClientConfig, ProfileStore};
use domain::UserId;
use proto::profile::{
    profile_service_client::ProfileServiceClient as ProtoProfileServiceClient,
    DeleteProfileRequest,
};

/// gRPC client wrapper for profile-service.
pub struct ProfileClient {
    client: ProtoProfileServiceClient<Channel>,
}

impl ProfileClient {
    /// Create a client; the connection is established on first call.
    pub fn connect_lazy(config: &GrpcClientConfig) -> Result<Self, tonic::transport::Error> {
        debug!("Using profile-service at {}", config.endpoint);
        let client = ProtoProfileServiceClient::new(config.lazy_channel()?);
        Ok(Self { client })
    }
}

#[async_trait]
impl ProfileStore for ProfileClient {
    async fn delete_profile(&self, uid: &UserId) -> AppResult<()> {
        let request = tonic::Request::new(DeleteProfileRequest {
            uid: uid.to_string(),
        });

        let mut client = self.client.clone();
        let response = client.delete_profile(request).await.map_err(AppError::from)?;

        if !response.into_inner().existed {
            debug!(uid = %uid, "Profile document was already absent");
        }
        Ok(())
    }
}
