//! Identity service business logic.

mod identity_service;

pub use identity_service::{Claims, IdentityManager, IdentityService, TokenResponse};
