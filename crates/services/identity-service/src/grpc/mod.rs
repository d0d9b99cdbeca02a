//! gRPC service implementations.

mod identity_grpc;

pub use identity_grpc::IdentityGrpcService;
