//! Common utilities shared across all services.
//!
//! This crate provides:
//! - Unified error handling for HTTP and gRPC
//! - Configuration structures
//! - Database connection and migration helpers (feature `database`)
//! - The identity and profile store ports, with in-memory implementations

pub mod config;
#[cfg(feature = "database")]
pub mod db;
pub mod error;
pub mod store;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use store::{IdentityStore, InMemoryIdentityStore, InMemoryProfileStore, ProfileStore};

#[cfg(any(test, feature = "test-utils"))]
pub use store::{MockIdentityStore, MockProfileStore};
