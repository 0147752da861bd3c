//! Friend business logic - Handles the people an admin lends money to.
//!
//! Friends are never hard-deleted. A soft-deleted friend disappears from every
//! lookup here and can no longer receive new transactions.

use crate::{
    core::{admin, validation},
    entities::{Friend, friend},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Adds a friend to an admin's ledger.
///
/// The name is trimmed; email and phone are optional but must be well-formed
/// when given.
pub async fn add_friend(
    db: &DatabaseConnection,
    admin_id: i64,
    name: &str,
    email: Option<&str>,
    phone: Option<&str>,
) -> Result<friend::Model> {
    let name = validation::validate_name("name", name)?;
    let email = validation::normalize_email(email)?;
    let phone = validation::normalize_phone(phone)?;

    admin::get_admin_by_id(db, admin_id)
        .await?
        .ok_or_else(|| Error::AdminNotFound {
            id: admin_id.to_string(),
        })?;

    let friend = friend::ActiveModel {
        admin_id: Set(admin_id),
        name: Set(name),
        email: Set(email),
        phone: Set(phone),
        is_deleted: Set(false),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = friend.insert(db).await?;
    info!(admin_id, friend_id = result.id, "Added friend {}", result.name);
    Ok(result)
}

/// Retrieves an admin's active friends, ordered alphabetically by name.
pub async fn get_active_friends(
    db: &DatabaseConnection,
    admin_id: i64,
) -> Result<Vec<friend::Model>> {
    Friend::find()
        .filter(friend::Column::AdminId.eq(admin_id))
        .filter(friend::Column::IsDeleted.eq(false))
        .order_by_asc(friend::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an active friend by ID.
pub async fn get_friend_by_id(
    db: &DatabaseConnection,
    friend_id: i64,
) -> Result<Option<friend::Model>> {
    Friend::find_by_id(friend_id)
        .filter(friend::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds active friend records by email, ignoring case.
///
/// The same person may be tracked by several admins, so this can return more
/// than one record.
pub async fn find_friends_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Vec<friend::Model>> {
    Friend::find()
        .filter(friend::Column::Email.eq(email.trim().to_lowercase()))
        .filter(friend::Column::IsDeleted.eq(false))
        .order_by_asc(friend::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Replaces a friend's email and phone. `None` or blank clears the field.
pub async fn update_friend_contact(
    db: &DatabaseConnection,
    friend_id: i64,
    email: Option<&str>,
    phone: Option<&str>,
) -> Result<friend::Model> {
    let email = validation::normalize_email(email)?;
    let phone = validation::normalize_phone(phone)?;

    let friend = get_friend_by_id(db, friend_id)
        .await?
        .ok_or_else(|| Error::FriendNotFound {
            id: friend_id.to_string(),
        })?;

    let mut active_model: friend::ActiveModel = friend.into();
    active_model.email = Set(email);
    active_model.phone = Set(phone);
    active_model.update(db).await.map_err(Into::into)
}

/// Soft-deletes a friend. Their transactions stay in the database.
pub async fn delete_friend(db: &DatabaseConnection, friend_id: i64) -> Result<()> {
    let friend = get_friend_by_id(db, friend_id)
        .await?
        .ok_or_else(|| Error::FriendNotFound {
            id: friend_id.to_string(),
        })?;

    let mut active_model: friend::ActiveModel = friend.into();
    active_model.is_deleted = Set(true);
    active_model.update(db).await?;

    info!(friend_id, "Deleted friend");
    Ok(())
}
