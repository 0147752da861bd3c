//! Admin entity - Represents an administrator who lends money to friends.
//!
//! Credentials live with the external identity provider; this table only holds
//! the profile keyed by `auth_user_id` and the admin's currency preference.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Administrator profile database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    /// Unique identifier for the administrator
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Identity issued by the external authentication provider
    #[sea_orm(unique)]
    pub auth_user_id: String,
    /// Display name
    pub username: String,
    /// Login email, stored lowercase
    #[sea_orm(unique)]
    pub email: String,
    /// Optional contact phone number
    pub phone: Option<String>,
    /// Three-letter currency code every amount of this admin is denominated in
    pub currency: String,
    /// When the profile was registered
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Admin and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One admin tracks many friends
    #[sea_orm(has_many = "super::friend::Entity")]
    Friends,
    /// One admin records many transactions
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
}

impl Related<super::friend::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Friends.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
