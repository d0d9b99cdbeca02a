//! Middleware for caller authentication and rate limiting.

mod auth;
mod cache;
mod rate_limit;

pub use auth::{auth_middleware, CurrentUser, TokenVerifier};
pub use cache::Cache;
pub use rate_limit::rate_limit_middleware;

#[cfg(test)]
pub use auth::MockTokenVerifier;
