//! Gateway configuration.

use common::{env_first, env_parse_or, GrpcClientConfig, RateLimitConfig};

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Identity service gRPC client (token verification, account deletion)
    pub identity_service: GrpcClientConfig,
    /// Profile service gRPC client (profile document deletion)
    pub profile_service: GrpcClientConfig,
    /// Redis URL for rate limiting; rate limiting is off when unset
    pub redis_url: Option<String>,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Rate limit for `/deleteUser`
    pub rate_limit: RateLimitConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let rate_defaults = RateLimitConfig::default();

        Self {
            identity_service: grpc_client_from_env(
                &["GATEWAY_IDENTITY_SERVICE_URL", "IDENTITY_SERVICE_URL"],
                defaults.identity_service,
            ),
            profile_service: grpc_client_from_env(
                &["GATEWAY_PROFILE_SERVICE_URL", "PROFILE_SERVICE_URL"],
                defaults.profile_service,
            ),
            redis_url: env_first(&["GATEWAY_REDIS_URL", "REDIS_URL"])
                .filter(|url| !url.is_empty()),
            host: env_first(&["GATEWAY_HOST"]).unwrap_or(defaults.host),
            port: env_parse_or(&["GATEWAY_PORT"], defaults.port),
            rate_limit: RateLimitConfig {
                max_requests: env_parse_or(&["RATE_LIMIT_REQUESTS"], rate_defaults.max_requests),
                window_seconds: env_parse_or(
                    &["RATE_LIMIT_WINDOW_SECONDS"],
                    rate_defaults.window_seconds,
                ),
            },
        }
    }

    /// Extract identity service port from URL.
    pub fn identity_port(&self) -> u16 {
        self.identity_service.port().unwrap_or(50051)
    }

    /// Extract profile service port from URL.
    pub fn profile_port(&self) -> u16 {
        self.profile_service.port().unwrap_or(50052)
    }
}

fn grpc_client_from_env(url_keys: &[&str], default: GrpcClientConfig) -> GrpcClientConfig {
    GrpcClientConfig {
        endpoint: env_first(url_keys).unwrap_or(default.endpoint),
        connect_timeout_ms: env_parse_or(
            &["GATEWAY_GRPC_CONNECT_TIMEOUT_MS"],
            default.connect_timeout_ms,
        ),
        request_timeout_ms: env_parse_or(
            &["GATEWAY_GRPC_REQUEST_TIMEOUT_MS"],
            default.request_timeout_ms,
        ),
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            identity_service: GrpcClientConfig::new("http://localhost:50051"),
            profile_service: GrpcClientConfig::new("http://localhost:50052"),
            redis_url: None,
            host: "0.0.0.0".to_string(),
            port: 3000,
            rate_limit: RateLimitConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ports_follow_service_urls() {
        let config = GatewayConfig::default();
        assert_eq!(config.identity_port(), 50051);
        assert_eq!(config.profile_port(), 50052);
        assert!(config.redis_url.is_none());
    }
}
