//! gRPC clients for calling other services.

mod identity_client;

pub use identity_client::IdentityClient;
