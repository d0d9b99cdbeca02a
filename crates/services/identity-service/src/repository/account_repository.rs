//! Account repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use super::entities::account::{ActiveModel, Entity as AccountEntity};
use common::{AppError, AppResult};
use domain::{AuthRecord, UserId};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find account by user id
    async fn find(&self, uid: &UserId) -> AppResult<Option<AuthRecord>>;

    /// Insert a new account
    async fn insert(&self, record: AuthRecord) -> AppResult<AuthRecord>;

    /// Permanently delete an account (NotFound when absent)
    async fn delete(&self, uid: &UserId) -> AppResult<()>;
}

/// Concrete implementation of AccountRepository
pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for AccountStore {
    async fn find(&self, uid: &UserId) -> AppResult<Option<AuthRecord>> {
        let result = AccountEntity::find_by_id(uid.as_str().to_owned())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result
            .map(AuthRecord::try_from)
            .transpose()
            .map_err(AppError::from)
    }

    async fn insert(&self, record: AuthRecord) -> AppResult<AuthRecord> {
        if self.find(&record.uid).await?.is_some() {
            return Err(AppError::conflict(format!("Account {}", record.uid)));
        }

        let active_model = ActiveModel {
            uid: Set(record.uid.as_str().to_owned()),
            email: Set(record.email),
            display_name: Set(record.display_name),
            disabled: Set(record.disabled),
            created_at: Set(record.created_at),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        AuthRecord::try_from(model).map_err(AppError::from)
    }

    async fn delete(&self, uid: &UserId) -> AppResult<()> {
        let result = AccountEntity::delete_by_id(uid.as_str().to_owned())
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!("Account {}", uid)));
        }

        Ok(())
    }
}
