//! Transaction business logic - Records and retrieves loans and repayments.
//!
//! Recording validates the amount and checks that the friend is active and
//! belongs to the recording admin. Nothing here stores a balance: balances are
//! always recomputed from the transaction log by [`crate::core::balance`].

use crate::{
    core::{friend, validation},
    entities::{Transaction, transaction},
    errors::{Error, Result},
    models::TransactionKind,
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// A loan or repayment about to be recorded.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// Admin recording the transaction
    pub admin_id: i64,
    /// Friend the money moved to or from
    pub friend_id: i64,
    /// Loan or repayment
    pub kind: TransactionKind,
    /// Amount as entered; must be finite and positive
    pub amount: f64,
    /// When it happened; defaults to now
    pub transaction_date: Option<DateTime<Utc>>,
    /// Optional note
    pub description: Option<String>,
}

/// Records a loan or repayment.
///
/// The amount is rejected if zero, negative or not finite. The friend must be
/// active and tracked by `admin_id`.
pub async fn record_transaction(
    db: &DatabaseConnection,
    new: NewTransaction,
) -> Result<transaction::Model> {
    let amount = validation::parse_amount(new.amount)?;

    let friend = friend::get_friend_by_id(db, new.friend_id)
        .await?
        .filter(|f| f.admin_id == new.admin_id)
        .ok_or_else(|| Error::FriendNotFound {
            id: new.friend_id.to_string(),
        })?;

    let description = new
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    let now = Utc::now();
    let transaction_model = transaction::ActiveModel {
        admin_id: Set(new.admin_id),
        friend_id: Set(friend.id),
        transaction_type: Set(new.kind.as_str().to_string()),
        amount: Set(new.amount),
        transaction_date: Set(new.transaction_date.unwrap_or(now)),
        description: Set(description),
        created_at: Set(now),
        ..Default::default()
    };

    let result = transaction_model.insert(db).await?;
    info!(
        admin_id = new.admin_id,
        friend_id = friend.id,
        transaction_id = result.id,
        "Recorded {} of {} for {}",
        new.kind,
        amount,
        friend.name
    );
    Ok(result)
}

/// Retrieves every transaction an admin has recorded, newest `transaction_date` first.
pub async fn get_transactions_for_admin(
    db: &DatabaseConnection,
    admin_id: i64,
) -> Result<Vec<transaction::Model>> {
    Transaction::find()
        .filter(transaction::Column::AdminId.eq(admin_id))
        .order_by_desc(transaction::Column::TransactionDate)
        .order_by_desc(transaction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a friend's transactions, newest `transaction_date` first.
pub async fn get_transactions_for_friend(
    db: &DatabaseConnection,
    friend_id: i64,
) -> Result<Vec<transaction::Model>> {
    Transaction::find()
        .filter(transaction::Column::FriendId.eq(friend_id))
        .order_by_desc(transaction::Column::TransactionDate)
        .order_by_desc(transaction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific transaction by its unique ID.
pub async fn get_transaction_by_id(
    db: &DatabaseConnection,
    transaction_id: i64,
) -> Result<Option<transaction::Model>> {
    Transaction::find_by_id(transaction_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Deletes a transaction recorded by `admin_id`.
///
/// Used for corrections. Balances reflect the removal on their next
/// computation.
pub async fn delete_transaction(
    db: &DatabaseConnection,
    admin_id: i64,
    transaction_id: i64,
) -> Result<()> {
    let transaction = get_transaction_by_id(db, transaction_id)
        .await?
        .filter(|t| t.admin_id == admin_id)
        .ok_or(Error::TransactionNotFound { id: transaction_id })?;

    transaction.delete(db).await?;
    info!(admin_id, transaction_id, "Deleted transaction");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use chrono::TimeZone;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_record_transaction_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        for amount in [0.0, -10.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = record_transaction(
                &db,
                NewTransaction {
                    admin_id: 1,
                    friend_id: 1,
                    kind: TransactionKind::Loan,
                    amount,
                    transaction_date: None,
                    description: None,
                },
            )
            .await;
            assert!(matches!(result, Err(Error::InvalidAmount { amount: _ })));
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_record_transaction_success() -> Result<()> {
        let (db, admin, alice) = setup_with_friend().await?;
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

        let tx = record_transaction(
            &db,
            NewTransaction {
                admin_id: admin.id,
                friend_id: alice.id,
                kind: TransactionKind::Repayment,
                amount: 25.5,
                transaction_date: Some(date),
                description: Some("  coffee money ".to_string()),
            },
        )
        .await?;

        assert_eq!(tx.transaction_type, "repayment");
        assert_eq!(tx.amount, 25.5);
        assert_eq!(tx.transaction_date, date);
        assert_eq!(tx.description.as_deref(), Some("coffee money"));
        assert_eq!(tx.kind()?, TransactionKind::Repayment);

        Ok(())
    }

    #[tokio::test]
    async fn test_record_transaction_blank_description() -> Result<()> {
        let (db, admin, alice) = setup_with_friend().await?;

        let tx = record_transaction(
            &db,
            NewTransaction {
                admin_id: admin.id,
                friend_id: alice.id,
                kind: TransactionKind::Loan,
                amount: 5.0,
                transaction_date: None,
                description: Some("   ".to_string()),
            },
        )
        .await?;
        assert_eq!(tx.description, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_record_transaction_wrong_admin() -> Result<()> {
        let (db, _admin, alice) = setup_with_friend().await?;
        let intruder = create_test_admin(&db, "intruder@example.com").await?;

        let result =
            create_test_transaction(&db, intruder.id, alice.id, TransactionKind::Loan, 10.0).await;
        assert!(matches!(result, Err(Error::FriendNotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_record_transaction_deleted_friend() -> Result<()> {
        let (db, admin, alice) = setup_with_friend().await?;
        crate::core::friend::delete_friend(&db, alice.id).await?;

        let result =
            create_test_transaction(&db, admin.id, alice.id, TransactionKind::Loan, 10.0).await;
        assert!(matches!(result, Err(Error::FriendNotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_transactions_ordered_newest_first() -> Result<()> {
        let (db, admin, alice) = setup_with_friend().await?;

        for (day, amount) in [(5, 10.0), (1, 20.0), (9, 30.0)] {
            record_transaction(
                &db,
                NewTransaction {
                    admin_id: admin.id,
                    friend_id: alice.id,
                    kind: TransactionKind::Loan,
                    amount,
                    transaction_date: Some(Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()),
                    description: None,
                },
            )
            .await?;
        }

        let amounts: Vec<f64> = get_transactions_for_friend(&db, alice.id)
            .await?
            .iter()
            .map(|t| t.amount)
            .collect();
        assert_eq!(amounts, [30.0, 10.0, 20.0]);

        let for_admin = get_transactions_for_admin(&db, admin.id).await?;
        assert_eq!(for_admin.len(), 3);
        assert_eq!(for_admin[0].amount, 30.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_transactions_for_friend_isolated() -> Result<()> {
        let (db, admin, alice) = setup_with_friend().await?;
        let bob = create_test_friend(&db, admin.id, "Bob").await?;

        create_test_transaction(&db, admin.id, alice.id, TransactionKind::Loan, 10.0).await?;
        create_test_transaction(&db, admin.id, bob.id, TransactionKind::Loan, 20.0).await?;

        let for_alice = get_transactions_for_friend(&db, alice.id).await?;
        assert_eq!(for_alice.len(), 1);
        assert_eq!(for_alice[0].friend_id, alice.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_transaction() -> Result<()> {
        let (db, admin, alice) = setup_with_friend().await?;
        let other = create_test_admin(&db, "other@example.com").await?;
        let tx = create_test_transaction(&db, admin.id, alice.id, TransactionKind::Loan, 10.0).await?;

        // Another admin cannot delete it
        assert!(matches!(
            delete_transaction(&db, other.id, tx.id).await,
            Err(Error::TransactionNotFound { .. })
        ));

        delete_transaction(&db, admin.id, tx.id).await?;
        assert!(get_transaction_by_id(&db, tx.id).await?.is_none());

        assert!(matches!(
            delete_transaction(&db, admin.id, tx.id).await,
            Err(Error::TransactionNotFound { id }) if id == tx.id
        ));

        Ok(())
    }
}
