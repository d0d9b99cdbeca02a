//! gRPC protocol buffer definitions.
//!
//! This crate contains the generated gRPC service definitions for:
//! - IdentityService: authentication accounts (get, create, delete, verify token)
//! - ProfileService: profile documents in `usuarios` (get, create, delete)

/// Identity service definitions.
pub mod identity {
    tonic::include_proto!("identity");
}

/// Profile service definitions.
pub mod profile {
    tonic::include_proto!("profile");
}

// Re-export commonly used items
pub use identity::identity_service_client::IdentityServiceClient;
pub use identity::identity_service_server::{IdentityService, IdentityServiceServer};
pub use profile::profile_service_client::ProfileServiceClient;
pub use profile::profile_service_server::{ProfileService, ProfileServiceServer};
