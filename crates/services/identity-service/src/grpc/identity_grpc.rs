//! gRPC implementation for IdentityService.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::service::IdentityService;
use common::AppError;
use domain::{AuthRecord, UserId};
use proto::identity::{
    identity_service_server::IdentityService as IdentityServiceProto, AccountResponse,
    CreateAccountRequest, DeleteAccountRequest, DeleteAccountResponse, GetAccountRequest,
    VerifyTokenRequest, VerifyTokenResponse,
};

/// gRPC service wrapper for IdentityService.
pub struct IdentityGrpcService {
    service: Arc<dyn IdentityService>,
}

impl IdentityGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(service: Arc<dyn IdentityService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl IdentityServiceProto for IdentityGrpcService {
    async fn get_account(
        &self,
        request: Request<GetAccountRequest>,
    ) -> Result<Response<AccountResponse>, Status> {
        let uid = parse_uid(request.into_inner().uid)?;

        let record = self.service.get_account(&uid).await.map_err(Status::from)?;
        Ok(Response::new(account_to_proto(record)))
    }

    async fn create_account(
        &self,
        request: Request<CreateAccountRequest>,
    ) -> Result<Response<AccountResponse>, Status> {
        let req = request.into_inner();
        let mut record = AuthRecord::new(parse_uid(req.uid)?);
        record.email = req.email;
        record.display_name = req.display_name;

        let record = self
            .service
            .create_account(record)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(account_to_proto(record)))
    }

    async fn delete_account(
        &self,
        request: Request<DeleteAccountRequest>,
    ) -> Result<Response<DeleteAccountResponse>, Status> {
        let uid = parse_uid(request.into_inner().uid)?;

        self.service
            .delete_account(&uid)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(DeleteAccountResponse {}))
    }

    async fn verify_token(
        &self,
        request: Request<VerifyTokenRequest>,
    ) -> Result<Response<VerifyTokenResponse>, Status> {
        let req = request.into_inner();

        match self.service.verify_token(&req.token) {
            Ok(claims) => Ok(Response::new(VerifyTokenResponse {
                valid: true,
                uid: claims.sub,
                email: claims.email,
            })),
            Err(_) => Ok(Response::new(VerifyTokenResponse {
                valid: false,
                uid: String::new(),
                email: None,
            })),
        }
    }
}

fn parse_uid(raw: String) -> Result<UserId, Status> {
    UserId::parse(raw).map_err(|e| Status::from(AppError::from(e)))
}

fn account_to_proto(record: AuthRecord) -> AccountResponse {
    AccountResponse {
        uid: record.uid.into_string(),
        email: record.email,
        display_name: record.display_name,
        disabled: record.disabled,
        created_at: record.created_at.to_rfc3339(),
    }
}
