//! Profile Service Library
//!
//! This crate owns the `usuarios` profile documents and exposes them via gRPC.
//! Every document it actually deletes fires the deletion trigger, which
//! removes the matching account from the identity service.

pub mod client;
pub mod config;
pub mod grpc;
pub mod infra;
pub mod repository;
pub mod service;
pub mod trigger;

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::info;

pub use common::db::MigrateAction;

use crate::client::IdentityClient;
use crate::config::ProfileServiceConfig;
use crate::grpc::ProfileGrpcService;
use crate::infra::Database;
use crate::repository::{ProfileRepository, ProfileTable};
use crate::service::ProfileManager;
use crate::trigger::{DeletionPropagator, SpawningDispatcher};
use common::IdentityStore;
use domain::{DeletionOutcome, UserId};

/// Profile service wired to its deletion trigger.
pub struct ProfilePipeline {
    pub service: Arc<ProfileManager>,
    pub dispatcher: Arc<SpawningDispatcher>,
}

/// Connect a profile repository to a propagator that deletes from `identity`.
pub fn build_pipeline(
    repo: Arc<dyn ProfileRepository>,
    identity: Arc<dyn IdentityStore>,
) -> ProfilePipeline {
    let propagator = Arc::new(DeletionPropagator::new(identity));
    let dispatcher = Arc::new(SpawningDispatcher::new(propagator));
    let service = Arc::new(ProfileManager::new(repo, dispatcher.clone()));

    ProfilePipeline {
        service,
        dispatcher,
    }
}

/// Run the profile service as an embedded component (for combined binary).
pub async fn run_embedded(
    host: &str,
    port: u16,
    identity_port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ProfileServiceConfig::from_env();
    let identity_host = if host == "0.0.0.0" { "127.0.0.1" } else { host };
    config.identity_service.endpoint = format!("http://{}:{}", identity_host, identity_port);

    run_server_with_config(host, port, config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = ProfileServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    for line in db.migrate(action).await? {
        println!("{}", line);
    }

    Ok(())
}

/// Fire the deletion trigger once by hand for `uid`.
pub async fn propagate_once(uid: &str) -> Result<DeletionOutcome, Box<dyn std::error::Error>> {
    let config = ProfileServiceConfig::from_env();
    let identity = Arc::new(IdentityClient::connect_lazy(&config.identity_service)?);
    let uid = UserId::parse(uid)?;

    Ok(DeletionPropagator::new(identity).propagate(&uid).await)
}

/// Run the gRPC server with the given configuration.
pub async fn run_server_with_config(
    host: &str,
    port: u16,
    config: ProfileServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize database
    let db = Database::connect(&config.database).await?;

    // Create repository, trigger and service
    let profile_repo = Arc::new(ProfileTable::new(db.get_connection()));
    let identity = Arc::new(IdentityClient::connect_lazy(&config.identity_service)?);
    let pipeline = build_pipeline(profile_repo, identity);

    // Create gRPC service
    let grpc_service = ProfileGrpcService::new(pipeline.service.clone());

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Profile service listening on {}", addr);

    // Run server until interrupted
    Server::builder()
        .add_service(proto::ProfileServiceServer::new(grpc_service))
        .serve_with_shutdown(addr, async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    // Let in-flight deletion triggers finish
    info!("Waiting for pending deletion triggers");
    pipeline.dispatcher.wait_idle().await;

    Ok(())
}
