//! Validation of user-supplied account and lesson fields.

use crate::error::{ApiError, Result};

const MIN_NAME_LEN: usize = 2;

/// Trim a display name and reject ones shorter than two characters.
pub fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.chars().count() < MIN_NAME_LEN {
        return Err(ApiError::BadRequest(format!(
            "Name must be at least {MIN_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

/// Lowercase and trim an email address, rejecting obviously malformed ones.
pub fn validate_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
        }
        None => false,
    };

    if !valid || email.chars().any(char::is_whitespace) {
        return Err(ApiError::BadRequest("A valid email is required".to_string()));
    }
    Ok(email)
}

/// Require a non-blank value for a named field.
pub fn require_field(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ApiError::BadRequest(format!("{field} is required"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  Rudo ").unwrap(), "Rudo");
        assert!(matches!(validate_name("   "), Err(ApiError::BadRequest(_))));
        assert!(validate_name(" J ").is_err());
        assert_eq!(validate_name("Jo").unwrap(), "Jo");
    }

    #[test]
    fn test_validate_email_normalizes() {
        assert_eq!(
            validate_email(" Thandi@Example.COM ").unwrap(),
            "thandi@example.com"
        );
    }

    #[test]
    fn test_validate_email_rejects_malformed() {
        for bad in ["", "nobody", "@example.com", "a@b", "a@.com", "a@b.", "a b@c.com", "a@b@c.com"] {
            assert!(validate_email(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_require_field() {
        assert_eq!(require_field(Some(" Hello ".to_string()), "title").unwrap(), "Hello");

        let err = require_field(None, "title").unwrap_err();
        assert_eq!(err.to_string(), "Bad request: title is required");

        assert!(require_field(Some("  ".to_string()), "content").is_err());
    }
}
