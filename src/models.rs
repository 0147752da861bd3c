//! Shared domain vocabulary that is not tied to a database table.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The two kinds of movement between an admin and a friend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money lent to the friend; increases what they owe
    Loan,
    /// Money paid back by the friend; decreases what they owe
    Repayment,
}

impl TransactionKind {
    /// The string stored in the `transaction_type` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loan => "loan",
            Self::Repayment => "repayment",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "loan" => Ok(Self::Loan),
            "repayment" => Ok(Self::Repayment),
            other => Err(Error::UnknownTransactionKind {
                value: other.to_string(),
            }),
        }
    }
}

/// What the balance aggregator does with a transaction whose type is neither
/// `loan` nor `repayment`.
///
/// Such a record never contributes to any total. The policy only decides whether
/// it alone is enough for its friend to appear in the result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKindPolicy {
    /// The friend appears with zero totals even if every one of their
    /// transactions is of an unknown type
    #[default]
    IncludeZeroed,
    /// The friend appears only once a `loan` or `repayment` references them
    Omit,
}
