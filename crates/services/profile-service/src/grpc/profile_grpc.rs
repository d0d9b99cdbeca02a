//! gRPC implementation for ProfileService.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::service::ProfileService;
use common::AppError;
use domain::{ProfileDocument, UserId};
use proto::profile::{
    profile_service_server::ProfileService as ProfileServiceProto, CreateProfileRequest,
    DeleteProfileRequest, DeleteProfileResponse, GetProfileRequest, ProfileResponse,
};

/// gRPC service wrapper for ProfileService.
pub struct ProfileGrpcService {
    service: Arc<dyn ProfileService>,
}

impl ProfileGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(service: Arc<dyn ProfileService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl ProfileServiceProto for ProfileGrpcService {
    async fn get_profile(
        &self,
        request: Request<GetProfileRequest>,
    ) -> Result<Response<ProfileResponse>, Status> {
        let uid = parse_uid(request.into_inner().uid)?;

        let document = self.service.get_profile(&uid).await.map_err(Status::from)?;
        Ok(Response::new(profile_to_proto(document)))
    }

    async fn create_profile(
        &self,
        request: Request<CreateProfileRequest>,
    ) -> Result<Response<ProfileResponse>, Status> {
        let req = request.into_inner();
        let mut document = ProfileDocument::new(parse_uid(req.uid)?);
        document.name = req.name;
        document.email = req.email;

        let document = self
            .service
            .create_profile(document)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(profile_to_proto(document)))
    }

    async fn delete_profile(
        &self,
        request: Request<DeleteProfileRequest>,
    ) -> Result<Response<DeleteProfileResponse>, Status> {
        let uid = parse_uid(request.into_inner().uid)?;

        let existed = self
            .service
            .delete_profile(&uid)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(DeleteProfileResponse { existed }))
    }
}

fn parse_uid(raw: String) -> Result<UserId, Status> {
    UserId::parse(raw).map_err(|e| Status::from(AppError::from(e)))
}

fn profile_to_proto(document: ProfileDocument) -> ProfileResponse {
    ProfileResponse {
        uid: document.uid.into_string(),
        name: document.name,
        email: document.email,
        created_at: document.created_at.to_rfc3339(),
        updated_at: document.updated_at.to_rfc3339(),
    }
}
