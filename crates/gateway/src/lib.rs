//! API Gateway Library
//!
//! This crate provides the HTTP surface of the deletion flow: it
//! authenticates callers and forwards user deletions to the identity and
//! profile services over gRPC.

pub mod clients;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::clients::{IdentityClient, ProfileClient};
use crate::config::GatewayConfig;
use crate::middleware::Cache;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the gateway as an embedded component (for combined binary).
pub async fn run_embedded(
    host: &str,
    port: u16,
    identity_port: u16,
    profile_port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = GatewayConfig::from_env();
    config.identity_service.endpoint = format!("http://{}:{}", loopback(host), identity_port);
    config.profile_service.endpoint = format!("http://{}:{}", loopback(host), profile_port);

    run_server_with_config(host, port, config).await
}

/// Sibling services bound to the wildcard address are reached on localhost.
fn loopback(host: &str) -> &str {
    if host == "0.0.0.0" {
        "127.0.0.1"
    } else {
        host
    }
}

/// Run the HTTP server with the given configuration.
pub async fn run_server_with_config(
    host: &str,
    port: u16,
    config: GatewayConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Create gRPC clients
    let identity = Arc::new(IdentityClient::connect_lazy(&config.identity_service)?);
    let profiles = Arc::new(ProfileClient::connect_lazy(&config.profile_service)?);

    // Connect Redis when configured
    let cache = match config.redis_url.as_deref() {
        Some(url) => Some(Arc::new(Cache::connect(url).await?)),
        None => {
            warn!("No Redis URL configured, rate limiting disabled");
            None
        }
    };

    // Create app state
    let state = AppState::new(identity.clone(), profiles, identity, cache, config);

    // Build router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Gateway listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
