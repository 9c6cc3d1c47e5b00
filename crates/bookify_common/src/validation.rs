// --- File: crates/bookify_common/src/validation.rs ---
//! Field validation for user registration data.
//!
//! The rules are deliberately strict: a name is alphabetic words, an email
//! is `local@domain.tld` built from word characters, dots and dashes, a
//! phone number is exactly ten digits and an age lies in 1..=99.

use crate::models::NewUser;
use thiserror::Error;

/// A single failed field check. The messages are the ones shown to the
/// person filling in the registration form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name must contain only alphabets and spaces.")]
    InvalidName,
    #[error("Invalid email address.")]
    InvalidEmail,
    #[error("Phone number must be exactly 10 digits.")]
    InvalidPhoneNumber,
    #[error("Age must be between 1 and 99.")]
    InvalidAge,
}

/// Checks that a name is non-empty and contains only letters and spaces.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let stripped: String = name.chars().filter(|c| *c != ' ').collect();
    if stripped.is_empty() || !stripped.chars().all(char::is_alphabetic) {
        return Err(ValidationError::InvalidName);
    }
    Ok(())
}

// Word characters, dots and dashes, per the registration form contract.
fn is_email_atom(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.' || c == '-'
}

/// Checks that an email looks like `local@domain.tld`.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };
    if local.is_empty() || !local.chars().all(is_email_atom) {
        return Err(ValidationError::InvalidEmail);
    }
    // The domain needs at least one dot and a word-only final label.
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return Err(ValidationError::InvalidEmail);
    };
    if host.is_empty() || !host.chars().all(is_email_atom) {
        return Err(ValidationError::InvalidEmail);
    }
    if tld.is_empty() || !tld.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Checks that a phone number is exactly ten ASCII digits.
pub fn validate_phone_number(phone_number: &str) -> Result<(), ValidationError> {
    if phone_number.len() != 10 || !phone_number.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidPhoneNumber);
    }
    Ok(())
}

/// Checks that an age lies in 1..=99.
pub fn validate_age(age: i64) -> Result<(), ValidationError> {
    if !(1..=99).contains(&age) {
        return Err(ValidationError::InvalidAge);
    }
    Ok(())
}

/// Validates every field of a registration payload, collecting all
/// failures instead of stopping at the first.
pub fn validate_new_user(user: &NewUser) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    if let Err(err) = validate_name(&user.name) {
        errors.push(err);
    }
    if let Err(err) = validate_email(&user.email) {
        errors.push(err);
    }
    if let Err(err) = validate_phone_number(&user.phone_number) {
        errors.push(err);
    }
    if let Err(err) = validate_age(user.age) {
        errors.push(err);
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_names_with_spaces() {
        assert!(validate_name("Ada Lovelace").is_ok());
        assert!(validate_name("Ada").is_ok());
    }

    #[test]
    fn rejects_empty_and_non_alphabetic_names() {
        assert_eq!(validate_name(""), Err(ValidationError::InvalidName));
        assert_eq!(validate_name("   "), Err(ValidationError::InvalidName));
        assert_eq!(validate_name("Ada42"), Err(ValidationError::InvalidName));
        assert_eq!(validate_name("Ada-Lovelace"), Err(ValidationError::InvalidName));
    }

    #[test]
    fn accepts_plain_emails() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("a.b-c_d@mail.example.org").is_ok());
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["", "ada", "ada@", "@example.com", "ada@example", "ada@exa mple.com"] {
            assert_eq!(validate_email(email), Err(ValidationError::InvalidEmail), "{email}");
        }
    }

    #[test]
    fn phone_number_must_be_ten_digits() {
        assert!(validate_phone_number("0123456789").is_ok());
        assert_eq!(
            validate_phone_number("123456789"),
            Err(ValidationError::InvalidPhoneNumber)
        );
        assert_eq!(
            validate_phone_number("12345678901"),
            Err(ValidationError::InvalidPhoneNumber)
        );
        assert_eq!(
            validate_phone_number("12345abcde"),
            Err(ValidationError::InvalidPhoneNumber)
        );
    }

    #[test]
    fn age_bounds_are_inclusive() {
        assert!(validate_age(1).is_ok());
        assert!(validate_age(99).is_ok());
        assert_eq!(validate_age(0), Err(ValidationError::InvalidAge));
        assert_eq!(validate_age(100), Err(ValidationError::InvalidAge));
    }

    #[test]
    fn collects_every_failed_field() {
        let user = NewUser {
            name: "4da".to_string(),
            email: "nope".to_string(),
            phone_number: "123".to_string(),
            age: 0,
        };
        let errors = validate_new_user(&user).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn valid_user_passes() {
        let user = NewUser {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: "0123456789".to_string(),
            age: 36,
        };
        assert!(validate_new_user(&user).is_ok());
    }
}
