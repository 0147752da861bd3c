//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod admin;
pub mod friend;
pub mod transaction;

// Re-export specific types to avoid conflicts
pub use admin::{Column as AdminColumn, Entity as Admin, Model as AdminModel};
pub use friend::{Column as FriendColumn, Entity as Friend, Model as FriendModel};
pub use transaction::{
    Column as TransactionColumn, Entity as Transaction, Model as TransactionModel,
};
