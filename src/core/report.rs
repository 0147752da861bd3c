//! Report generation business logic.
//!
//! This module provides functions for building friend statements, repayment
//! progress and formatted balance lines. All functions are framework-agnostic and
//! return plain data or strings that any presentation layer can render.

use crate::{
    core::balance::{FriendBalance, LedgerStatus, LedgerSummary},
    entities::{friend, transaction},
    errors::{Error, Result},
    models::UnknownKindPolicy,
};
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use sea_orm::DatabaseConnection;

/// Everything a friend sees when they open their own balance.
#[derive(Debug, Clone)]
pub struct FriendStatement {
    /// The friend being reported on
    pub friend: friend::Model,
    /// Currency of the admin who tracks this friend
    pub currency: String,
    /// Current totals
    pub balance: FriendBalance,
    /// Percentage of the borrowed total that has been repaid
    pub progress_percent: f64,
    /// Most recent transactions, newest first
    pub recent_transactions: Vec<transaction::Model>,
}

/// Builds a statement for one friend.
///
/// # Arguments
/// * `db` - Database connection
/// * `friend_id` - Friend to report on
/// * `transaction_limit` - Maximum number of recent transactions to include (default 10)
/// * `policy` - How unknown transaction types are treated
pub async fn generate_friend_statement(
    db: &DatabaseConnection,
    friend_id: i64,
    transaction_limit: Option<u64>,
    policy: UnknownKindPolicy,
) -> Result<FriendStatement> {
    let friend = crate::core::friend::get_friend_by_id(db, friend_id)
        .await?
        .ok_or_else(|| Error::FriendNotFound {
            id: friend_id.to_string(),
        })?;

    let admin = crate::core::admin::get_admin_by_id(db, friend.admin_id)
        .await?
        .ok_or_else(|| Error::AdminNotFound {
            id: friend.admin_id.to_string(),
        })?;

    let balance = crate::core::balance::load_friend_balance(db, friend_id, policy).await?;

    let limit = transaction_limit.unwrap_or(10);
    let recent_transactions: Vec<transaction::Model> =
        crate::core::transaction::get_transactions_for_friend(db, friend_id)
            .await?
            .into_iter()
            .take(limit.try_into()?)
            .collect();

    Ok(FriendStatement {
        friend,
        currency: admin.currency,
        progress_percent: calculate_repayment_progress(&balance),
        balance,
        recent_transactions,
    })
}

/// Calculates how much of the borrowed total has been repaid, as a percentage.
///
/// - 0% = nothing repaid yet (also returned when nothing was borrowed)
/// - 100% = fully repaid
/// - Above 100% indicates overpayment
///
/// Ratios too large for an exact decimal fall back to floating point.
#[must_use]
pub fn calculate_repayment_progress(balance: &FriendBalance) -> f64 {
    let borrowed = balance.total_borrowed();
    let repaid = balance.total_repaid();
    if borrowed.is_zero() {
        return 0.0;
    }

    repaid
        .checked_div(borrowed)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|percent| percent.to_f64())
        .or_else(|| Some(repaid.to_f64()? / borrowed.to_f64()? * 100.0))
        .unwrap_or(0.0)
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80.0%`
///
/// # Arguments
/// * `progress_percent` - Progress percentage (0-100)
/// * `bar_length` - Length of the progress bar in characters (default 10)
#[must_use]
pub fn format_progress_bar(progress_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped_progress = progress_percent.clamp(0.0, 100.0);

    // Cast safety: clamped_progress ∈ [0, 100], length is small (10-20).
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped_progress / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);

    format!("[{filled_str}{empty_str}] {progress_percent:.1}%")
}

/// Symbol for the handful of currencies rendered without their code.
#[must_use]
pub fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" | "CAD" | "AUD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "INR" => Some("₹"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

/// Formats an amount with its sign and currency, rounded to two places.
///
/// Returns strings like `"$60.00"`, `"-$30.00"` or `"CHF 12.50"`.
#[must_use]
pub fn format_amount(amount: Decimal, currency: &str) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let magnitude = rounded.abs();

    currency_symbol(currency).map_or_else(
        || format!("{sign}{currency} {magnitude:.2}"),
        |symbol| format!("{sign}{symbol}{magnitude:.2}"),
    )
}

/// One-line summary of a friend's balance.
#[must_use]
pub fn format_balance_line(name: &str, balance: &FriendBalance, currency: &str) -> String {
    format!(
        "{name}: borrowed {} | repaid {} | remaining {}",
        format_amount(balance.total_borrowed(), currency),
        format_amount(balance.total_repaid(), currency),
        format_amount(balance.remaining_balance(), currency),
    )
}

/// Headline for the whole ledger: settled, or how much is still out.
#[must_use]
pub fn format_ledger_status(summary: &LedgerSummary, currency: &str) -> String {
    match summary.status {
        LedgerStatus::AllSettled => "All settled".to_string(),
        LedgerStatus::Outstanding => {
            use std::fmt::Write;

            let mut line = format!(
                "Outstanding: {} owed across {} of {} friends",
                format_amount(summary.total_owed, currency),
                summary.outstanding_count,
                summary.friend_count,
            );
            if !summary.total_overpaid.is_zero() {
                // Writing to a String cannot fail
                let _ = write!(
                    line,
                    " ({} overpaid)",
                    format_amount(summary.total_overpaid, currency)
                );
            }
            line
        }
    }
}

/// Generates a summary line for a transaction.
#[must_use]
pub fn format_transaction_summary(transaction: &transaction::Model, currency: &str) -> String {
    let amount = Decimal::from_f64(transaction.amount).map_or_else(
        || transaction.amount.to_string(),
        |amount| format_amount(amount, currency),
    );
    let date = transaction.transaction_date.format("%Y-%m-%d");
    let tx_type = &transaction.transaction_type;
    let desc = transaction.description.as_deref().unwrap_or("-");

    format!("{date} | {tx_type} | {amount} | {desc}")
}
