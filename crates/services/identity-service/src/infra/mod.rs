//! Infrastructure layer - database schema.

pub mod migrations;

pub use migrations::Migrator;

/// Accounts database handle.
pub type Database = common::db::Database<Migrator>;
