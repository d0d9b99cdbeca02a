//! Database connection and migration management.
//!
//! Each service owns its schema through its own `MigratorTrait` type; this
//! wrapper is generic over it.

use std::collections::HashSet;
use std::marker::PhantomData;
use std::time::Duration;

use sea_orm::{
    ConnectOptions, Database as SeaDatabase, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
};
use sea_orm_migration::{seaql_migrations, MigratorTrait};

use crate::config::DatabaseConfig;

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Database wrapper for connection management
pub struct Database<M> {
    connection: DatabaseConnection,
    _migrator: PhantomData<M>,
}

impl<M> Clone for Database<M> {
    fn clone(&self) -> Self {
        Self {
            connection: self.connection.clone(),
            _migrator: PhantomData,
        }
    }
}

impl<M: MigratorTrait> Database<M> {
    /// Initialize database connection and run migrations.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let db = Self::connect_without_migrations(config).await?;

        // Run pending migrations
        M::up(&db.connection, None).await?;
        tracing::info!("Database connected and migrations applied");

        Ok(db)
    }

    /// Connect without running migrations (for CLI commands).
    pub async fn connect_without_migrations(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let connection = SeaDatabase::connect(options).await?;
        Ok(Self {
            connection,
            _migrator: PhantomData,
        })
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Apply a migration action, returning status lines for `Status`.
    pub async fn migrate(&self, action: MigrateAction) -> Result<Vec<String>, DbErr> {
        match action {
            MigrateAction::Up => {
                M::up(&self.connection, None).await?;
                tracing::info!("Migrations applied successfully");
                Ok(Vec::new())
            }
            MigrateAction::Down => {
                M::down(&self.connection, Some(1)).await?;
                tracing::info!("Rolled back last migration");
                Ok(Vec::new())
            }
            MigrateAction::Status => {
                let lines = self
                    .migration_status()
                    .await?
                    .into_iter()
                    .map(|(name, applied)| {
                        let marker = if applied { "[x]" } else { "[ ]" };
                        format!("{} {}", marker, name)
                    })
                    .collect();
                Ok(lines)
            }
            MigrateAction::Fresh => {
                M::fresh(&self.connection).await?;
                tracing::info!("Database reset and migrations applied");
                Ok(Vec::new())
            }
        }
    }

    /// Get migration status (list all migrations with applied status).
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        // Get applied migrations from database
        let applied: HashSet<String> = seaql_migrations::Entity::find()
            .order_by_asc(seaql_migrations::Column::Version)
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect();

        // Map all defined migrations with their applied status
        Ok(M::migrations()
            .iter()
            .map(|m| {
                let name = m.name().to_string();
                let is_applied = applied.contains(&name);
                (name, is_applied)
            })
            .collect())
    }
}
