//! Friend entity - A counterparty who borrows from (or repays) an admin.
//!
//! Friends are soft-deleted so their transaction history is preserved.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Friend database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "friends")]
pub struct Model {
    /// Unique identifier for the friend
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Admin who tracks this friend
    pub admin_id: i64,
    /// Display name
    pub name: String,
    /// Optional email, stored lowercase; used for the friend's own balance view
    pub email: Option<String>,
    /// Optional phone number
    pub phone: Option<String>,
    /// Soft delete flag - if true, friend is hidden but data is preserved
    pub is_deleted: bool,
    /// When the friend was added
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Friend and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each friend belongs to one admin
    #[sea_orm(
        belongs_to = "super::admin::Entity",
        from = "Column::AdminId",
        to = "super::admin::Column::Id"
    )]
    Admin,
    /// One friend has many transactions
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
}

impl Related<super::admin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Admin.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
