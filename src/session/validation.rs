//! Auth Form Validation
//!
//! Client-side checks run before any auth request is sent. They mirror
//! the backend's rules and messages so the user sees the same text
//! whichever side rejects the input.

use std::sync::OnceLock;

use regex::Regex;

pub const MIN_PASSWORD_LEN: usize = 8;

/// A rejected form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message)
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

pub fn validate_email(email: &str) -> Result<(), FieldError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(FieldError::new("email", "Email jest wymagany"));
    }
    if !email_regex().is_match(email) {
        return Err(FieldError::new("email", "Nieprawidłowy format email"));
    }
    Ok(())
}

/// Password plus confirmation for forms that set a new password
fn validate_new_password(
    field: &'static str,
    password: &str,
    confirm: &str,
) -> Result<(), FieldError> {
    if password.is_empty() {
        return Err(FieldError::new(field, "Hasło jest wymagane"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(FieldError::new(
            field,
            "Hasło musi mieć co najmniej 8 znaków",
        ));
    }
    if confirm.is_empty() {
        return Err(FieldError::new(
            "passwordConfirm",
            "Potwierdzenie hasła jest wymagane",
        ));
    }
    if password != confirm {
        return Err(FieldError::new("passwordConfirm", "Hasła nie są identyczne"));
    }
    Ok(())
}

pub fn validate_login(email: &str, password: &str) -> Result<(), FieldError> {
    validate_email(email)?;
    if password.is_empty() {
        return Err(FieldError::new("password", "Hasło jest wymagane"));
    }
    Ok(())
}

pub fn validate_register(email: &str, password: &str, confirm: &str) -> Result<(), FieldError> {
    validate_email(email)?;
    validate_new_password("password", password, confirm)
}

pub fn validate_reset_confirm(token: &str, password: &str, confirm: &str) -> Result<(), FieldError> {
    if token.trim().is_empty() {
        return Err(FieldError::new(
            "token",
            "Link resetujący jest nieprawidłowy lub wygasł.",
        ));
    }
    validate_new_password("password", password, confirm)
}

pub fn validate_password_change(
    current: &str,
    new_password: &str,
    confirm: &str,
) -> Result<(), FieldError> {
    if current.is_empty() {
        return Err(FieldError::new(
            "currentPassword",
            "Obecne hasło jest wymagane",
        ));
    }
    validate_new_password("newPassword", new_password, confirm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_rules() {
        assert_eq!(validate_email("  ").unwrap_err().message, "Email jest wymagany");
        assert_eq!(
            validate_email("jan.kowalski").unwrap_err().message,
            "Nieprawidłowy format email"
        );
        assert_eq!(
            validate_email("jan @example.pl").unwrap_err().message,
            "Nieprawidłowy format email"
        );
        assert!(validate_email("jan@example.pl").is_ok());
    }

    #[test]
    fn test_login_requires_password_but_not_length() {
        assert_eq!(
            validate_login("jan@example.pl", "").unwrap_err().field,
            "password"
        );
        assert!(validate_login("jan@example.pl", "x").is_ok());
    }

    #[test]
    fn test_register_password_rules() {
        let err = validate_register("jan@example.pl", "short", "short").unwrap_err();
        assert_eq!(err.message, "Hasło musi mieć co najmniej 8 znaków");

        let err = validate_register("jan@example.pl", "longenough", "").unwrap_err();
        assert_eq!(err.field, "passwordConfirm");

        let err = validate_register("jan@example.pl", "longenough", "different").unwrap_err();
        assert_eq!(err.message, "Hasła nie są identyczne");

        assert!(validate_register("jan@example.pl", "longenough", "longenough").is_ok());
    }

    #[test]
    fn test_password_length_counts_characters() {
        // 8 characters, more than 8 bytes
        assert!(validate_register("a@b.pl", "żółćżółć", "żółćżółć").is_ok());
    }

    #[test]
    fn test_reset_confirm_needs_token() {
        let err = validate_reset_confirm("", "longenough", "longenough").unwrap_err();
        assert_eq!(err.message, "Link resetujący jest nieprawidłowy lub wygasł.");
    }

    #[test]
    fn test_password_change_fields() {
        assert_eq!(
            validate_password_change("", "longenough", "longenough")
                .unwrap_err()
                .field,
            "currentPassword"
        );
        assert_eq!(
            validate_password_change("old", "short", "short")
                .unwrap_err()
                .field,
            "newPassword"
        );
    }
}
