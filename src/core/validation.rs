//! Input validation.
//!
//! Validates secret names, environment names and recipient identities.

use crate::error::{Result, ValidationError};

/// Validate a secret name.
///
/// Secret names must be valid environment variable names:
/// - Only A-Z, a-z, 0-9, and underscore
/// - Cannot start with a digit
/// - Cannot be empty
///
/// # Errors
///
/// Returns `ValidationError` if the name is invalid.
pub fn validate_secret_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName.into());
    }

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid(name, "cannot start with a digit".to_string()));
    }

    if let Some((i, ch)) = name
        .chars()
        .enumerate()
        .find(|(_, ch)| !ch.is_ascii_alphanumeric() && *ch != '_')
    {
        return Err(invalid(
            name,
            format!(
                "invalid character '{}' at position {}. Only letters, digits, and underscore are allowed",
                ch,
                i + 1
            ),
        ));
    }

    Ok(())
}

/// Validate an environment name.
///
/// Environment names become directory names: letters, digits, `-`, `_`
/// and `.`, not starting with `.`.
pub fn validate_env_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName.into());
    }

    if name.starts_with('.') {
        return Err(invalid(name, "cannot start with '.'".to_string()));
    }

    if let Some(ch) = name
        .chars()
        .find(|ch| !ch.is_ascii_alphanumeric() && !matches!(ch, '-' | '_' | '.'))
    {
        return Err(invalid(name, format!("invalid character '{}'", ch)));
    }

    Ok(())
}

/// Validate a user handle, headless label or machine name.
pub fn validate_identity(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName.into());
    }

    if name.chars().any(|ch| ch.is_whitespace() || ch.is_control()) {
        return Err(invalid(name, "cannot contain whitespace".to_string()));
    }

    Ok(())
}

fn invalid(name: &str, reason: String) -> crate::error::Error {
    ValidationError::InvalidName {
        name: name.to_string(),
        reason,
    }
    .into()
}
