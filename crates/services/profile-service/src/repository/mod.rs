//! Repository layer for data access.

pub mod entities;
mod memory;
mod profile_repository;

pub use memory::InMemoryProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileTable};

#[cfg(any(test, feature = "test-utils"))]
pub use profile_repository::MockProfileRepository;
