//! Account input validation for sign-up and profile forms

use std::sync::OnceLock;

use regex::Regex;

use crate::types::ValidationError;

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"))
}

fn special_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"[!@#$%^&*()_+\-=\[\]{};':"\\|,.<>/?]"#).expect("valid regex")
    })
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if trimmed.chars().count() < 2 {
        return Err(ValidationError::NameTooShort);
    }
    Ok(())
}

/// Exactly ten digits once separators are stripped
pub fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    if phone.trim().is_empty() {
        return Err(ValidationError::PhoneRequired);
    }
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if digits != 10 {
        return Err(ValidationError::PhoneInvalid);
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !email_re().is_match(email) {
        return Err(ValidationError::EmailInvalid);
    }
    Ok(())
}

/// At least 8 characters with an uppercase letter, a special character and a digit
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    if password.chars().count() < 8 {
        return Err(ValidationError::PasswordTooShort);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::PasswordNoUppercase);
    }
    if !special_re().is_match(password) {
        return Err(ValidationError::PasswordNoSpecial);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PasswordNoDigit);
    }
    Ok(())
}
