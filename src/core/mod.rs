//! Core business logic - framework-agnostic ledger operations.

/// Admin registration and profile management
pub mod admin;
/// Per-friend balance aggregation and ledger summaries
pub mod balance;
/// Friend management
pub mod friend;
/// Friend statements and formatting helpers
pub mod report;
/// Recording and listing loans and repayments
pub mod transaction;
/// Form validation: passwords, contacts, amounts
pub mod validation;
