//! Account database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{AuthRecord, DomainError, UserId};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uid: String,
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub disabled: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl TryFrom<Model> for AuthRecord {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(AuthRecord {
            uid: UserId::parse(model.uid)?,
            email: model.email,
            display_name: model.display_name,
            disabled: model.disabled,
            created_at: model.created_at,
        })
    }
}
