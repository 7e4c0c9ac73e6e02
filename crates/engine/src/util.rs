//! Internal helpers for input validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! normalization so every operation stores and compares the same values.

use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

pub(crate) const MIN_PASSWORD_LEN: usize = 6;

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::InvalidInput(format!("invalid {label} id")))
}

/// Canonical form of an email: trimmed, NFKC normalized and lowercased.
pub(crate) fn normalize_email(value: &str) -> ResultEngine<String> {
    let email: String = value.trim().nfkc().collect::<String>().to_lowercase();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(EngineError::InvalidInput("invalid email".to_string()));
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(EngineError::InvalidInput("invalid email".to_string()));
    }
    Ok(email)
}

pub(crate) fn normalize_required_name(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(
            "name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.nfkc().collect())
}

pub(crate) fn normalize_text(value: &str) -> String {
    value.trim().to_string()
}

pub(crate) fn validate_password(value: &str) -> ResultEngine<()> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(EngineError::InvalidInput(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(
            normalize_email("  Alice@Example.COM ").unwrap(),
            "alice@example.com"
        );
    }

    #[test]
    fn email_compatibility_forms_collapse() {
        // Fullwidth letters fold to ASCII under NFKC.
        assert_eq!(
            normalize_email("ａｌｉｃｅ@example.com").unwrap(),
            "alice@example.com"
        );
    }

    #[test]
    fn email_without_at_is_rejected() {
        assert!(normalize_email("alice.example.com").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("alice@").is_err());
        assert!(normalize_email("a@b@c").is_err());
    }

    #[test]
    fn short_passwords_are_rejected() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(normalize_required_name("   ").is_err());
        assert_eq!(normalize_required_name(" Ada ").unwrap(), "Ada");
    }
}
