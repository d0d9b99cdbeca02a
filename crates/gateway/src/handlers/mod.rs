//! HTTP request handlers.

pub mod deletion_handler;
pub mod health_handler;

pub use deletion_handler::{
    deletion_routes, DeleteUserRequest, DeleteUserResponse, UserDeletionEndpoint,
};
pub use health_handler::health_routes;
