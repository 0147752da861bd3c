//! Input validation for registration and recording forms.
//!
//! Everything here is a pure function over borrowed input. Shape checks are
//! deliberately loose; they catch typos, not every address a mail server would
//! refuse.

use crate::errors::{Error, Result};
use rust_decimal::{Decimal, prelude::FromPrimitive};

/// Minimum number of characters a password must have.
pub const MIN_PASSWORD_LENGTH: usize = 8;

const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

/// Coarse password strength rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordStrength {
    /// Two or fewer criteria met
    Weak,
    /// Three or four criteria met
    Fair,
    /// All five criteria met
    Strong,
}

/// Rates a password against five criteria: minimum length, a lowercase letter,
/// an uppercase letter, a digit and a symbol.
#[must_use]
pub fn check_password_strength(password: &str) -> PasswordStrength {
    let criteria = [
        password.chars().count() >= MIN_PASSWORD_LENGTH,
        password.chars().any(char::is_lowercase),
        password.chars().any(char::is_uppercase),
        password.chars().any(|c| c.is_ascii_digit()),
        password
            .chars()
            .any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
    ];

    match criteria.iter().filter(|met| **met).count() {
        0..=2 => PasswordStrength::Weak,
        3 | 4 => PasswordStrength::Fair,
        _ => PasswordStrength::Strong,
    }
}

/// Validates a new password and its confirmation.
///
/// # Errors
/// [`Error::Validation`] if the password is too short, rated
/// [`PasswordStrength::Weak`], or does not match `confirmation`.
pub fn validate_password(password: &str, confirmation: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(Error::validation(
            "password",
            format!("must be at least {MIN_PASSWORD_LENGTH} characters"),
        ));
    }

    if check_password_strength(password) == PasswordStrength::Weak {
        return Err(Error::validation(
            "password",
            "mix upper and lower case letters, digits and symbols",
        ));
    }

    if password != confirmation {
        return Err(Error::validation("password", "confirmation does not match"));
    }

    Ok(())
}

/// Checks that `email` looks like `local@domain.tld`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// Checks that `phone` is an optional `+` followed by 7 to 15 digits, allowing
/// spaces, dashes, dots and parentheses as separators.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    let body = phone.strip_prefix('+').unwrap_or(phone);

    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '.' | '(' | ')'))
    {
        return false;
    }

    let digits = body.chars().filter(char::is_ascii_digit).count();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

/// Converts an amount entered for recording into an exact decimal.
///
/// # Errors
/// [`Error::InvalidAmount`] if the amount is zero, negative, NaN or infinite.
pub fn parse_amount(amount: f64) -> Result<Decimal> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }

    Decimal::from_f64(amount).ok_or(Error::InvalidAmount { amount })
}

/// Checks that a currency code is three ASCII uppercase letters, e.g. `USD`.
///
/// # Errors
/// [`Error::Validation`] for any other shape.
pub fn validate_currency_code(code: &str) -> Result<()> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(Error::validation(
            "currency",
            format!("'{code}' is not a three-letter currency code"),
        ))
    }
}

/// Trims a display name and rejects it if nothing is left.
///
/// # Errors
/// [`Error::Validation`] naming `field` if the trimmed name is empty.
pub fn validate_name(field: &'static str, name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(field, "cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// Normalises an optional email: trims, lowercases and checks its shape.
/// Blank input becomes `None`.
///
/// # Errors
/// [`Error::Validation`] if a non-blank email has the wrong shape.
pub fn normalize_email(email: Option<&str>) -> Result<Option<String>> {
    match email.map(str::trim).filter(|e| !e.is_empty()) {
        None => Ok(None),
        Some(e) if is_valid_email(e) => Ok(Some(e.to_lowercase())),
        Some(e) => Err(Error::validation(
            "email",
            format!("'{e}' is not a valid email address"),
        )),
    }
}

/// Normalises an optional phone number: trims and checks its shape.
/// Blank input becomes `None`.
///
/// # Errors
/// [`Error::Validation`] if a non-blank phone number has the wrong shape.
pub fn normalize_phone(phone: Option<&str>) -> Result<Option<String>> {
    match phone.map(str::trim).filter(|p| !p.is_empty()) {
        None => Ok(None),
        Some(p) if is_valid_phone(p) => Ok(Some(p.to_string())),
        Some(p) => Err(Error::validation(
            "phone",
            format!("'{p}' is not a valid phone number"),
        )),
    }
}
