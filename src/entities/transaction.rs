//! Transaction entity - A single loan or repayment between an admin and a friend.
//!
//! `transaction_type` is kept as text rather than a database enum so rows written
//! by other clients with unrecognised types can still be loaded; the balance
//! aggregator decides what to do with them.
use crate::models::TransactionKind;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Admin who recorded the transaction
    pub admin_id: i64,
    /// Friend the transaction belongs to
    pub friend_id: i64,
    /// `"loan"` or `"repayment"`
    pub transaction_type: String,
    /// Non-negative amount in the admin's currency
    pub amount: f64,
    /// When the loan or repayment happened; used for ordering only
    pub transaction_date: DateTimeUtc,
    /// Optional free-text note
    pub description: Option<String>,
    /// When the row was written
    pub created_at: DateTimeUtc,
}

impl Model {
    /// Parses the stored `transaction_type`.
    pub fn kind(&self) -> crate::errors::Result<TransactionKind> {
        self.transaction_type.parse()
    }
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transaction belongs to one friend
    #[sea_orm(
        belongs_to = "super::friend::Entity",
        from = "Column::FriendId",
        to = "super::friend::Column::Id"
    )]
    Friend,
    /// Each transaction was recorded by one admin
    #[sea_orm(
        belongs_to = "super::admin::Entity",
        from = "Column::AdminId",
        to = "super::admin::Column::Id"
    )]
    Admin,
}

impl Related<super::friend::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Friend.def()
    }
}

impl Related<super::admin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Admin.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
