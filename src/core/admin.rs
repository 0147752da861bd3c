//! Admin business logic - Registration and profile management.
//!
//! Credentials are created and checked by the external identity provider. This
//! module validates the registration form (including password strength, so the
//! provider is never handed a weak password) and stores the admin's profile.

use crate::{
    core::validation,
    entities::{Admin, admin},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Everything an admin submits when signing up.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    /// Identity issued by the external authentication provider
    pub auth_user_id: String,
    /// Display name
    pub username: String,
    /// Login email
    pub email: String,
    /// Optional phone number
    pub phone: Option<String>,
    /// Chosen password, only checked for strength here
    pub password: String,
    /// Password typed a second time
    pub password_confirmation: String,
    /// Three-letter currency code; the configured default when `None`
    pub currency: Option<String>,
}

/// Validates a registration form and stores the admin's profile.
///
/// The email is stored lowercase and must not already be registered. Admins who
/// leave the currency blank get `default_currency`.
pub async fn register_admin(
    db: &DatabaseConnection,
    form: RegistrationForm,
    default_currency: &str,
) -> Result<admin::Model> {
    let username = validation::validate_name("username", &form.username)?;
    let email = validation::normalize_email(Some(&form.email))?
        .ok_or_else(|| Error::validation("email", "is required"))?;
    let phone = validation::normalize_phone(form.phone.as_deref())?;
    validation::validate_password(&form.password, &form.password_confirmation)?;
    let currency = form
        .currency
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| default_currency.to_string());
    validation::validate_currency_code(&currency)?;

    let auth_user_id = form.auth_user_id.trim();
    if auth_user_id.is_empty() {
        return Err(Error::validation("auth_user_id", "cannot be empty"));
    }

    if get_admin_by_email(db, &email).await?.is_some() {
        return Err(Error::DuplicateAdmin { email });
    }

    let admin = admin::ActiveModel {
        auth_user_id: Set(auth_user_id.to_string()),
        username: Set(username),
        email: Set(email),
        phone: Set(phone),
        currency: Set(currency),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = admin.insert(db).await?;
    info!(admin_id = result.id, "Registered admin {}", result.username);
    Ok(result)
}

/// Finds an admin by primary key.
pub async fn get_admin_by_id(db: &DatabaseConnection, admin_id: i64) -> Result<Option<admin::Model>> {
    Admin::find_by_id(admin_id).one(db).await.map_err(Into::into)
}

/// Finds an admin by email, ignoring case.
pub async fn get_admin_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<admin::Model>> {
    Admin::find()
        .filter(admin::Column::Email.eq(email.trim().to_lowercase()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds the admin profile attached to an identity-provider user.
pub async fn get_admin_by_auth_user(
    db: &DatabaseConnection,
    auth_user_id: &str,
) -> Result<Option<admin::Model>> {
    Admin::find()
        .filter(admin::Column::AuthUserId.eq(auth_user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns every registered admin, oldest first.
pub async fn get_all_admins(db: &DatabaseConnection) -> Result<Vec<admin::Model>> {
    Admin::find()
        .order_by_asc(admin::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Changes the currency all of an admin's amounts are shown in.
///
/// Stored amounts are not converted.
pub async fn update_currency(
    db: &DatabaseConnection,
    admin_id: i64,
    currency: &str,
) -> Result<admin::Model> {
    validation::validate_currency_code(currency)?;

    let admin = get_admin_by_id(db, admin_id)
        .await?
        .ok_or_else(|| Error::AdminNotFound {
            id: admin_id.to_string(),
        })?;

    let mut active_model: admin::ActiveModel = admin.into();
    active_model.currency = Set(currency.to_string());
    active_model.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_register_admin_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let mut form = test_registration_form("valid@example.com");
        form.email = "not-an-email".to_string();
        assert!(matches!(
            register_admin(&db, form, "USD").await,
            Err(Error::Validation { field: "email", .. })
        ));

        let mut form = test_registration_form("valid@example.com");
        form.password = "short".to_string();
        form.password_confirmation = "short".to_string();
        assert!(matches!(
            register_admin(&db, form, "USD").await,
            Err(Error::Validation { field: "password", .. })
        ));

        let mut form = test_registration_form("valid@example.com");
        form.currency = Some("dollars".to_string());
        assert!(matches!(
            register_admin(&db, form, "USD").await,
            Err(Error::Validation { field: "currency", .. })
        ));

        let mut form = test_registration_form("valid@example.com");
        form.username = "  ".to_string();
        assert!(matches!(
            register_admin(&db, form, "USD").await,
            Err(Error::Validation { field: "username", .. })
        ));

        let mut form = test_registration_form("valid@example.com");
        form.phone = Some("12".to_string());
        assert!(matches!(
            register_admin(&db, form, "USD").await,
            Err(Error::Validation { field: "phone", .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_admin_success() -> Result<()> {
        let db = setup_test_db().await?;

        let mut form = test_registration_form("Jane@Example.com");
        form.username = "  Jane ".to_string();
        let admin = register_admin(&db, form, "USD").await?;

        assert_eq!(admin.username, "Jane");
        assert_eq!(admin.email, "jane@example.com");
        assert_eq!(admin.currency, "USD");

        let found = get_admin_by_email(&db, "JANE@example.com").await?.unwrap();
        assert_eq!(found.id, admin.id);

        let by_auth = get_admin_by_auth_user(&db, &admin.auth_user_id).await?.unwrap();
        assert_eq!(by_auth.id, admin.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_register_admin_currency_fallback() -> Result<()> {
        let db = setup_test_db().await?;

        let mut form = test_registration_form("euro@example.com");
        form.currency = None;
        let admin = register_admin(&db, form, "EUR").await?;
        assert_eq!(admin.currency, "EUR");

        let mut form = test_registration_form("yen@example.com");
        form.currency = Some(" JPY ".to_string());
        let admin = register_admin(&db, form, "EUR").await?;
        assert_eq!(admin.currency, "JPY");

        Ok(())
    }

    #[tokio::test]
    async fn test_register_admin_duplicate_email() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_admin(&db, "dup@example.com").await?;

        let mut form = test_registration_form("DUP@example.com");
        form.auth_user_id = "another-auth-id".to_string();
        let result = register_admin(&db, form, "USD").await;
        assert!(matches!(
            result,
            Err(Error::DuplicateAdmin { email }) if email == "dup@example.com"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_admins() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(get_all_admins(&db).await?.is_empty());

        create_test_admin(&db, "first@example.com").await?;
        create_test_admin(&db, "second@example.com").await?;

        let admins = get_all_admins(&db).await?;
        assert_eq!(admins.len(), 2);
        assert_eq!(admins[0].email, "first@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_currency() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_admin(&db, "cur@example.com").await?;

        let updated = update_currency(&db, admin.id, "EUR").await?;
        assert_eq!(updated.currency, "EUR");

        assert!(update_currency(&db, admin.id, "eur").await.is_err());
        assert!(matches!(
            update_currency(&db, 999, "GBP").await,
            Err(Error::AdminNotFound { .. })
        ));

        Ok(())
    }
}
