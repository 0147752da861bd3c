//! Unified error type for the loan ledger.
//!
//! Every fallible operation in the crate returns [`Result`]. Variants carry the
//! offending values so callers can render precise messages.

use thiserror::Error;

/// Errors surfaced by the ledger core, its persistence layer and configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or contained invalid values
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Database driver or query failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// An amount supplied for recording was zero, negative, or not a finite number
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// A stored transaction carries a negative or non-finite amount
    #[error("Transaction {transaction_id} has malformed amount {amount}")]
    MalformedTransaction {
        /// ID of the offending transaction
        transaction_id: i64,
        /// The rejected amount
        amount: f64,
    },

    /// A stored amount is valid but cannot be represented as an exact decimal:
    /// larger than about 7.9e28, or so small it would round to zero
    #[error("Transaction {transaction_id} amount {amount} is outside the exact decimal range")]
    AmountOutOfRange {
        /// ID of the offending transaction
        transaction_id: i64,
        /// The rejected amount
        amount: f64,
    },

    /// Summing a friend's transactions exceeded the decimal range
    #[error("Balance overflow for friend {friend_id}")]
    BalanceOverflow {
        /// Friend whose running total overflowed
        friend_id: i64,
    },

    /// A transaction type string outside `loan` / `repayment`
    #[error("Unknown transaction type: {value}")]
    UnknownTransactionKind {
        /// The unrecognised type string
        value: String,
    },

    /// User input failed a shape or strength check
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Name of the rejected field
        field: &'static str,
        /// Why it was rejected
        message: String,
    },

    /// An administrator with this email is already registered
    #[error("An administrator with email {email} already exists")]
    DuplicateAdmin {
        /// The conflicting email
        email: String,
    },

    /// Administrator lookup failed
    #[error("Administrator not found: {id}")]
    AdminNotFound {
        /// Requested identifier
        id: String,
    },

    /// Friend lookup failed, or the friend was deleted
    #[error("Friend not found: {id}")]
    FriendNotFound {
        /// Requested identifier
        id: String,
    },

    /// Transaction lookup failed, or it belongs to another administrator
    #[error("Transaction not found: {id}")]
    TransactionNotFound {
        /// Requested identifier
        id: i64,
    },

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable failure
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Integer conversion failure (e.g. a limit that does not fit `usize`)
    #[error("Integer conversion error: {0}")]
    IntConversion(#[from] std::num::TryFromIntError),
}

impl Error {
    /// Shorthand for building a [`Error::Validation`].
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
