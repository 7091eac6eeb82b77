//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::Role as DomainRole;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub role: Role,
    pub created_at: DateTimeWithTimeZone,
    pub last_sign_in_at: DateTimeWithTimeZone,
}

/// Informational role column. Never read for authorization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Role {
    #[sea_orm(string_value = "user")]
    User,
    #[sea_orm(string_value = "admin")]
    Admin,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain User.
impl From<Model> for quill_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            uid: model.uid,
            email: model.email,
            display_name: model.display_name,
            photo_url: model.photo_url,
            role: match model.role {
                Role::User => DomainRole::User,
                Role::Admin => DomainRole::Admin,
            },
            created_at: model.created_at.into(),
            last_sign_in_at: model.last_sign_in_at.into(),
        }
    }
}

/// Conversion from Domain User to SeaORM ActiveModel.
impl From<quill_core::domain::User> for ActiveModel {
    fn from(user: quill_core::domain::User) -> Self {
        Self {
            uid: Set(user.uid),
            email: Set(user.email),
            display_name: Set(user.display_name),
            photo_url: Set(user.photo_url),
            role: Set(match user.role {
                DomainRole::User => Role::User,
                DomainRole::Admin => Role::Admin,
            }),
            created_at: Set(user.created_at.into()),
            last_sign_in_at: Set(user.last_sign_in_at.into()),
        }
    }
}
