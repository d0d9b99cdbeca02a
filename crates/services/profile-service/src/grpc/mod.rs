//! gRPC service implementations.

mod profile_grpc;

pub use profile_grpc::ProfileGrpcService;
