//! Domain layer - Core entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! All types here are shared by the identity service, the profile service and
//! the gateway.

pub mod account;
pub mod constants;
pub mod deletion;
pub mod error;
pub mod profile;
pub mod user_id;

pub use account::AuthRecord;
pub use constants::*;
pub use deletion::DeletionOutcome;
pub use error::{DomainError, DomainResult};
pub use profile::{document_path, ProfileDeleted, ProfileDocument};
pub use user_id::UserId;
