//! SeaORM entities.

pub mod profile;
