//! gRPC clients for calling the identity and profile services.

mod identity_client;
mod profile_client;

pub use identity_client::IdentityClient;
pub use profile_client::ProfileClient;
