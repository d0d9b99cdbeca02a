//! Infrastructure layer - database schema.

pub mod migrations;

pub use migrations::Migrator;

/// Profile documents database handle.
pub type Database = common::db::Database<Migrator>;
