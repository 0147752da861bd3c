//! Balance aggregation - turns a transaction snapshot into per-friend balances.
//!
//! [`aggregate_balances`] is a pure function: it reads nothing but its arguments,
//! keeps no state between calls and produces the same map for any ordering of the
//! same transactions. Amounts are converted from their stored floating form into
//! exact decimals before any summing happens, so the result does not depend on
//! accumulation order and never picks up binary rounding noise.
//!
//! The async loaders at the bottom of the module fetch a snapshot from the
//! database and hand it to the aggregator.

use crate::{
    entities::{Friend, Transaction, friend, transaction},
    errors::{Error, Result},
    models::{TransactionKind, UnknownKindPolicy},
};
use rust_decimal::{Decimal, prelude::FromPrimitive};
use sea_orm::{DatabaseConnection, prelude::*};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Balances keyed by friend ID. Ordered so that iteration is deterministic.
pub type BalanceMap = BTreeMap<i64, FriendBalance>;

/// Running totals for one friend.
///
/// Fields are private so that `remaining_balance == total_borrowed - total_repaid`
/// holds after every call to [`FriendBalance::record`], not only once aggregation
/// has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FriendBalance {
    friend_id: i64,
    total_borrowed: Decimal,
    total_repaid: Decimal,
    remaining_balance: Decimal,
}

impl FriendBalance {
    /// A balance with all totals at zero.
    #[must_use]
    pub const fn new(friend_id: i64) -> Self {
        Self {
            friend_id,
            total_borrowed: Decimal::ZERO,
            total_repaid: Decimal::ZERO,
            remaining_balance: Decimal::ZERO,
        }
    }

    /// Adds one transaction's amount to the matching total and recomputes the
    /// remaining balance.
    ///
    /// # Errors
    /// Returns [`Error::BalanceOverflow`] if a total leaves the decimal range.
    /// The balance is left unchanged in that case.
    pub fn record(&mut self, kind: TransactionKind, amount: Decimal) -> Result<()> {
        let overflow = || Error::BalanceOverflow {
            friend_id: self.friend_id,
        };

        let (borrowed, repaid) = match kind {
            TransactionKind::Loan => (
                self.total_borrowed.checked_add(amount).ok_or_else(overflow)?,
                self.total_repaid,
            ),
            TransactionKind::Repayment => (
                self.total_borrowed,
                self.total_repaid.checked_add(amount).ok_or_else(overflow)?,
            ),
        };
        let remaining = borrowed.checked_sub(repaid).ok_or_else(overflow)?;

        self.total_borrowed = borrowed;
        self.total_repaid = repaid;
        self.remaining_balance = remaining;
        Ok(())
    }

    /// Friend these totals belong to
    #[must_use]
    pub const fn friend_id(&self) -> i64 {
        self.friend_id
    }

    /// Sum of all loans
    #[must_use]
    pub const fn total_borrowed(&self) -> Decimal {
        self.total_borrowed
    }

    /// Sum of all repayments
    #[must_use]
    pub const fn total_repaid(&self) -> Decimal {
        self.total_repaid
    }

    /// Borrowed minus repaid. Negative when the friend has overpaid.
    #[must_use]
    pub const fn remaining_balance(&self) -> Decimal {
        self.remaining_balance
    }

    /// True when nothing is owed in either direction.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.remaining_balance.is_zero()
    }
}

/// A transaction that passed boundary validation.
struct CheckedEntry {
    friend_id: i64,
    kind: Option<TransactionKind>,
    amount: Decimal,
}

fn check_entry(tx: &transaction::Model) -> Result<CheckedEntry> {
    let malformed = || Error::MalformedTransaction {
        transaction_id: tx.id,
        amount: tx.amount,
    };

    if !tx.amount.is_finite() || tx.amount < 0.0 {
        return Err(malformed());
    }

    let out_of_range = || Error::AmountOutOfRange {
        transaction_id: tx.id,
        amount: tx.amount,
    };
    let amount = Decimal::from_f64(tx.amount).ok_or_else(out_of_range)?;
    if amount.is_zero() && tx.amount > 0.0 {
        return Err(out_of_range());
    }

    Ok(CheckedEntry {
        friend_id: tx.friend_id,
        kind: tx.kind().ok(),
        amount,
    })
}

/// Computes every friend's balance from a snapshot of transactions.
///
/// The whole snapshot is validated before anything is summed: a negative or
/// non-finite amount anywhere fails the call with
/// [`Error::MalformedTransaction`] instead of producing partial totals.
/// Transactions whose type is neither `loan` nor `repayment` add nothing; `policy`
/// decides whether they still make their friend appear in the map.
///
/// # Errors
/// [`Error::MalformedTransaction`] for a negative or non-finite amount,
/// [`Error::AmountOutOfRange`] for an amount with no exact decimal form (non-zero
/// but rounding to zero, or beyond `Decimal::MAX`), [`Error::BalanceOverflow`]
/// if a total exceeds the decimal range.
pub fn aggregate_balances<'a, I>(transactions: I, policy: UnknownKindPolicy) -> Result<BalanceMap>
where
    I: IntoIterator<Item = &'a transaction::Model>,
{
    let entries = transactions
        .into_iter()
        .map(check_entry)
        .collect::<Result<Vec<_>>>()?;

    let mut balances = BalanceMap::new();
    for entry in entries {
        match (entry.kind, policy) {
            (Some(kind), _) => {
                balances
                    .entry(entry.friend_id)
                    .or_insert_with(|| FriendBalance::new(entry.friend_id))
                    .record(kind, entry.amount)?;
            }
            (None, UnknownKindPolicy::IncludeZeroed) => {
                balances
                    .entry(entry.friend_id)
                    .or_insert_with(|| FriendBalance::new(entry.friend_id));
            }
            (None, UnknownKindPolicy::Omit) => {}
        }
    }

    Ok(balances)
}

/// Whether any money is still outstanding across all friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LedgerStatus {
    /// Every friend's remaining balance is exactly zero
    AllSettled,
    /// At least one friend owes money or has overpaid
    Outstanding,
}

/// Ledger-wide totals derived from a [`BalanceMap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    /// Number of friends with at least one transaction
    pub friend_count: usize,
    /// Friends whose remaining balance is zero
    pub settled_count: usize,
    /// Friends whose remaining balance is non-zero
    pub outstanding_count: usize,
    /// Sum of all loans
    pub total_borrowed: Decimal,
    /// Sum of all repayments
    pub total_repaid: Decimal,
    /// Sum of positive remaining balances (what friends still owe)
    pub total_owed: Decimal,
    /// Sum of overpayments, as a positive amount
    pub total_overpaid: Decimal,
    /// `AllSettled` iff `outstanding_count == 0`
    pub status: LedgerStatus,
}

/// Folds per-friend balances into ledger-wide totals.
///
/// # Errors
/// [`Error::BalanceOverflow`] if a total exceeds the decimal range.
pub fn summarize(balances: &BalanceMap) -> Result<LedgerSummary> {
    let mut summary = LedgerSummary {
        friend_count: balances.len(),
        settled_count: 0,
        outstanding_count: 0,
        total_borrowed: Decimal::ZERO,
        total_repaid: Decimal::ZERO,
        total_owed: Decimal::ZERO,
        total_overpaid: Decimal::ZERO,
        status: LedgerStatus::AllSettled,
    };

    for balance in balances.values() {
        let overflow = || Error::BalanceOverflow {
            friend_id: balance.friend_id(),
        };

        summary.total_borrowed = summary
            .total_borrowed
            .checked_add(balance.total_borrowed())
            .ok_or_else(overflow)?;
        summary.total_repaid = summary
            .total_repaid
            .checked_add(balance.total_repaid())
            .ok_or_else(overflow)?;

        let remaining = balance.remaining_balance();
        if remaining.is_zero() {
            summary.settled_count += 1;
        } else {
            summary.outstanding_count += 1;
            if remaining.is_sign_positive() {
                summary.total_owed = summary.total_owed.checked_add(remaining).ok_or_else(overflow)?;
            } else {
                summary.total_overpaid = summary
                    .total_overpaid
                    .checked_add(remaining.abs())
                    .ok_or_else(overflow)?;
            }
        }
    }

    if summary.outstanding_count > 0 {
        summary.status = LedgerStatus::Outstanding;
    }
    Ok(summary)
}

fn warn_unknown_kinds(snapshot: &[transaction::Model]) {
    for tx in snapshot {
        if let Err(e) = tx.kind() {
            warn!(
                transaction_id = tx.id,
                friend_id = tx.friend_id,
                "Skipping transaction in balance aggregation: {}",
                e
            );
        }
    }
}

/// Loads the balances of every active friend of an admin.
///
/// Transactions of soft-deleted friends are left out of the snapshot.
pub async fn load_admin_balances(
    db: &DatabaseConnection,
    admin_id: i64,
    policy: UnknownKindPolicy,
) -> Result<BalanceMap> {
    let friend_ids: Vec<i64> = Friend::find()
        .filter(friend::Column::AdminId.eq(admin_id))
        .filter(friend::Column::IsDeleted.eq(false))
        .all(db)
        .await?
        .into_iter()
        .map(|f| f.id)
        .collect();

    if friend_ids.is_empty() {
        return Ok(BalanceMap::new());
    }

    let snapshot = Transaction::find()
        .filter(transaction::Column::AdminId.eq(admin_id))
        .filter(transaction::Column::FriendId.is_in(friend_ids))
        .all(db)
        .await?;

    warn_unknown_kinds(&snapshot);
    let balances = aggregate_balances(&snapshot, policy)?;
    debug!(
        admin_id,
        transactions = snapshot.len(),
        friends = balances.len(),
        "Aggregated admin balances"
    );
    Ok(balances)
}

/// Loads a single friend's balance, e.g. for the friend's own view.
///
/// A friend without transactions gets an all-zero balance.
pub async fn load_friend_balance(
    db: &DatabaseConnection,
    friend_id: i64,
    policy: UnknownKindPolicy,
) -> Result<FriendBalance> {
    crate::core::friend::get_friend_by_id(db, friend_id)
        .await?
        .ok_or_else(|| Error::FriendNotFound {
            id: friend_id.to_string(),
        })?;

    let snapshot = crate::core::transaction::get_transactions_for_friend(db, friend_id).await?;
    warn_unknown_kinds(&snapshot);

    let mut balances = aggregate_balances(&snapshot, policy)?;
    Ok(balances
        .remove(&friend_id)
        .unwrap_or_else(|| FriendBalance::new(friend_id)))
}
