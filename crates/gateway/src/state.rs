//! Application state for dependency injection.

use std::sync::Arc;

use common::{IdentityStore, ProfileStore};

use crate::config::GatewayConfig;
use crate::middleware::{Cache, TokenVerifier};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub verifier: Arc<dyn TokenVerifier>,
    /// Present only when Redis is configured
    pub cache: Option<Arc<Cache>>,
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        identity: Arc<dyn IdentityStore>,
        profiles: Arc<dyn ProfileStore>,
        verifier: Arc<dyn TokenVerifier>,
        cache: Option<Arc<Cache>>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            identity,
            profiles,
            verifier,
            cache,
            config,
        }
    }
}
