//! Input validation for CLI commands.
//!
//! Everything here runs before a request leaves the machine, so the user
//! gets an immediate message instead of a round trip for obviously bad
//! input. The services validate again on their side.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Permissive email shape check: something, an @, a domain with a dot.
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Validate an email address.
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email is too long (max 254 characters)".to_string());
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err("Please enter a valid email address".to_string());
    }

    Ok(())
}

/// Validate a password for registration and account setup.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    Ok(())
}

/// Confirm a repeated password matches.
pub fn validate_password_confirmation(password: &str, confirmation: &str) -> Result<(), String> {
    if password != confirmation {
        return Err("Passwords do not match".to_string());
    }

    Ok(())
}

/// Validate a display name.
pub fn validate_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name is required".to_string());
    }

    if trimmed.len() < 2 {
        return Err("Name is too short (min 2 characters)".to_string());
    }

    if trimmed.len() > 100 {
        return Err("Name is too long (max 100 characters)".to_string());
    }

    Ok(())
}

/// Validate a money amount: positive and no more than two decimal places.
pub fn validate_amount(amount: f64) -> Result<(), String> {
    if !amount.is_finite() {
        return Err("Amount must be a number".to_string());
    }

    if amount <= 0.0 {
        return Err("Amount must be greater than zero".to_string());
    }

    // Amounts are cents under the hood; anything finer is a typo.
    let cents = amount * 100.0;
    if (cents - cents.round()).abs() > 1e-6 {
        return Err("Amount cannot have more than two decimal places".to_string());
    }

    Ok(())
}

/// Validate the reason given when blacklisting a client.
pub fn validate_blacklist_reason(reason: &str) -> Result<(), String> {
    if reason.trim().is_empty() {
        return Err("Please provide a reason for blacklisting".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("jane@example.com").is_ok());
        assert!(validate_email("jane.doe+tag@sub.example.co").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("jane").is_err());
        assert!(validate_email("jane@example").is_err());
        assert!(validate_email("jane doe@example.com").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("a much longer passphrase").is_ok());

        let err = validate_password("1234567").unwrap_err();
        assert_eq!(err, "Password must be at least 8 characters long");
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_validate_password_confirmation() {
        assert!(validate_password_confirmation("secret-123", "secret-123").is_ok());

        let err = validate_password_confirmation("secret-123", "secret-124").unwrap_err();
        assert_eq!(err, "Passwords do not match");
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Jane Doe").is_ok());
        assert!(validate_name("  Jane  ").is_ok());

        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name("J").is_err());
        assert!(validate_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_amount_positive() {
        assert!(validate_amount(0.01).is_ok());
        assert!(validate_amount(100.0).is_ok());
        assert!(validate_amount(250.75).is_ok());

        assert!(validate_amount(0.0).is_err());
        assert!(validate_amount(-5.0).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_amount_decimal_places() {
        assert!(validate_amount(10.25).is_ok());
        assert!(validate_amount(10.2).is_ok());
        assert!(validate_amount(10.0).is_ok());

        let err = validate_amount(10.255).unwrap_err();
        assert_eq!(err, "Amount cannot have more than two decimal places");
        assert!(validate_amount(0.001).is_err());
    }

    #[test]
    fn test_validate_blacklist_reason() {
        assert!(validate_blacklist_reason("chargeback fraud").is_ok());

        let err = validate_blacklist_reason("   ").unwrap_err();
        assert_eq!(err, "Please provide a reason for blacklisting");
        assert!(validate_blacklist_reason("").is_err());
    }
}
