//! Common validation utilities.

use validator::ValidationError;

/// Minimum username length.
pub const MIN_USERNAME_LEN: usize = 3;

/// Maximum username length.
pub const MAX_USERNAME_LEN: usize = 50;

/// Minimum password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Resistance weights are logged in half-kilogram steps.
pub const WEIGHT_INCREMENT_KG: f64 = 0.5;

/// Validates a username: 3-50 ASCII alphanumerics, `-`, `_` or `.`.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let len = username.chars().count();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) {
        let mut err = ValidationError::new("username_length");
        err.message = Some(
            format!(
                "Username must be between {} and {} characters",
                MIN_USERNAME_LEN, MAX_USERNAME_LEN
            )
            .into(),
        );
        return Err(err);
    }

    if username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        Ok(())
    } else {
        let mut err = ValidationError::new("username_chars");
        err.message = Some(
            "Username may only contain letters, digits, hyphens, underscores and dots".into(),
        );
        Err(err)
    }
}

/// Validates that a password meets the minimum length.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        let mut err = ValidationError::new("password_length");
        err.message = Some(
            format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )
            .into(),
        );
        Err(err)
    }
}

/// Validates that a weight is a whole multiple of the logging increment.
pub fn validate_weight_increment(weight_kg: f64) -> Result<(), ValidationError> {
    let steps = weight_kg / WEIGHT_INCREMENT_KG;
    if weight_kg.is_finite() && (steps - steps.round()).abs() < 1e-9 {
        Ok(())
    } else {
        let mut err = ValidationError::new("weight_increment");
        err.message = Some("Weight must be logged in 0.5 kg steps".into());
        Err(err)
    }
}
