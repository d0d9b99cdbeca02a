//! Identity Service Library
//!
//! This crate owns authentication accounts and exposes them via gRPC.
//! Deleting an account that does not exist fails with `NOT_FOUND`, which
//! lets callers tell "already gone" apart from real failures.

pub mod config;
pub mod grpc;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::info;

pub use common::db::MigrateAction;

use crate::config::IdentityServiceConfig;
use crate::grpc::IdentityGrpcService;
use crate::infra::Database;
use crate::repository::AccountStore;
use crate::service::{IdentityManager, IdentityService, TokenResponse};
use domain::UserId;

/// Run the identity service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = IdentityServiceConfig::from_env()?;
    run_server_with_config(host, port, config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = IdentityServiceConfig::from_env()?;
    let db = Database::connect_without_migrations(&config.database).await?;

    for line in db.migrate(action).await? {
        println!("{}", line);
    }

    Ok(())
}

/// Issue a bearer token for an existing account (for CLI commands).
pub async fn issue_token(uid: &str) -> Result<TokenResponse, Box<dyn std::error::Error>> {
    let config = IdentityServiceConfig::from_env()?;
    let service = build_service(&config).await?;
    let uid = UserId::parse(uid)?;

    Ok(service.issue_token(&uid).await?)
}

async fn build_service(
    config: &IdentityServiceConfig,
) -> Result<Arc<IdentityManager>, Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    let account_repo = Arc::new(AccountStore::new(db.get_connection()));
    Ok(Arc::new(IdentityManager::new(account_repo, config.jwt.clone())))
}

/// Run the gRPC server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: IdentityServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize database, repository and service
    let identity_service = build_service(&config).await?;

    // Create gRPC service
    let grpc_service = IdentityGrpcService::new(identity_service);

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Identity service listening on {}", addr);

    // Run server
    Server::builder()
        .add_service(proto::IdentityServiceServer::new(grpc_service))
        .serve(addr)
        .await?;

    Ok(())
}
