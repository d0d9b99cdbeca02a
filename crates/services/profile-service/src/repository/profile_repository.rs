//! Profile document repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use super::entities::profile::{ActiveModel, Entity as ProfileEntity};
use common::{AppError, AppResult};
use domain::{ProfileDocument, UserId};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Profile repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find profile document by user id
    async fn find(&self, uid: &UserId) -> AppResult<Option<ProfileDocument>>;

    /// Insert a new profile document
    async fn insert(&self, document: ProfileDocument) -> AppResult<ProfileDocument>;

    /// Delete the document; `true` when a document was removed
    async fn delete(&self, uid: &UserId) -> AppResult<bool>;
}

/// Concrete implementation of ProfileRepository on SeaORM
pub struct ProfileTable {
    db: DatabaseConnection,
}

impl ProfileTable {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for ProfileTable {
    async fn find(&self, uid: &UserId) -> AppResult<Option<ProfileDocument>> {
        let result = ProfileEntity::find_by_id(uid.as_str().to_owned())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result
            .map(ProfileDocument::try_from)
            .transpose()
            .map_err(AppError::from)
    }

    async fn insert(&self, document: ProfileDocument) -> AppResult<ProfileDocument> {
        if self.find(&document.uid).await?.is_some() {
            return Err(AppError::conflict(format!("Profile {}", document.path())));
        }

        let active_model = ActiveModel {
            uid: Set(document.uid.as_str().to_owned()),
            name: Set(document.name),
            email: Set(document.email),
            created_at: Set(document.created_at),
            updated_at: Set(document.updated_at),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        ProfileDocument::try_from(model).map_err(AppError::from)
    }

    async fn delete(&self, uid: &UserId) -> AppResult<bool> {
        let result = ProfileEntity::delete_by_id(uid.as_str().to_owned())
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }
}
