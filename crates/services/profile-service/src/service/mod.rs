//! Profile service business logic.

mod profile_service;

pub use profile_service::{ProfileManager, ProfileService};
