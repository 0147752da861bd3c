//! Shared test utilities for the loan ledger.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        admin::{self, RegistrationForm},
        friend,
        transaction::{self, NewTransaction},
    },
    entities,
    errors::Result,
    models::TransactionKind,
};
use chrono::{TimeZone, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a registration form that passes validation.
///
/// # Defaults
/// * `auth_user_id`: `"auth-<email>"`
/// * `username`: `"Test Admin"`
/// * `password`: `"Sup3r-secret"`
/// * `currency`: `"USD"`
pub fn test_registration_form(email: &str) -> RegistrationForm {
    RegistrationForm {
        auth_user_id: format!("auth-{email}"),
        username: "Test Admin".to_string(),
        email: email.to_string(),
        phone: None,
        password: "Sup3r-secret".to_string(),
        password_confirmation: "Sup3r-secret".to_string(),
        currency: Some("USD".to_string()),
    }
}

/// Registers a test admin with [`test_registration_form`] defaults.
pub async fn create_test_admin(
    db: &DatabaseConnection,
    email: &str,
) -> Result<entities::admin::Model> {
    admin::register_admin(db, test_registration_form(email), "USD").await
}

/// Adds a friend with no contact details.
pub async fn create_test_friend(
    db: &DatabaseConnection,
    admin_id: i64,
    name: &str,
) -> Result<entities::friend::Model> {
    friend::add_friend(db, admin_id, name, None, None).await
}

/// Records a transaction dated now with no description.
pub async fn create_test_transaction(
    db: &DatabaseConnection,
    admin_id: i64,
    friend_id: i64,
    kind: TransactionKind,
    amount: f64,
) -> Result<entities::transaction::Model> {
    transaction::record_transaction(
        db,
        NewTransaction {
            admin_id,
            friend_id,
            kind,
            amount,
            transaction_date: None,
            description: None,
        },
    )
    .await
}

/// Writes a transaction row directly, bypassing validation.
/// Use this to simulate rows written by other clients, e.g. with unknown types.
pub async fn insert_raw_transaction(
    db: &DatabaseConnection,
    admin_id: i64,
    friend_id: i64,
    transaction_type: &str,
    amount: f64,
) -> Result<entities::transaction::Model> {
    let now = Utc::now();
    let model = entities::transaction::ActiveModel {
        admin_id: Set(admin_id),
        friend_id: Set(friend_id),
        transaction_type: Set(transaction_type.to_string()),
        amount: Set(amount),
        transaction_date: Set(now),
        description: Set(None),
        created_at: Set(now),
        ..Default::default()
    };
    Ok(model.insert(db).await?)
}

/// Builds an in-memory transaction for pure aggregation tests.
///
/// Dated 2024-01-15, admin 1, no description.
pub fn sample_transaction(
    id: i64,
    friend_id: i64,
    transaction_type: &str,
    amount: f64,
) -> entities::transaction::Model {
    let date = Utc
        .with_ymd_and_hms(2024, 1, 15, 9, 30, 0)
        .single()
        .unwrap_or_default();

    entities::transaction::Model {
        id,
        admin_id: 1,
        friend_id,
        transaction_type: transaction_type.to_string(),
        amount,
        transaction_date: date,
        description: None,
        created_at: date,
    }
}

/// Sets up a complete test environment with an admin and one friend.
/// Returns (db, admin, friend) for common test scenarios.
pub async fn setup_with_friend() -> Result<(
    DatabaseConnection,
    entities::admin::Model,
    entities::friend::Model,
)> {
    let db = setup_test_db().await?;
    let admin = create_test_admin(&db, "admin@example.com").await?;
    let friend = create_test_friend(&db, admin.id, "Alice").await?;
    Ok((db, admin, friend))
}
