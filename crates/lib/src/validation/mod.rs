//! Credential and note text validation.
//!
//! These checks are pure: they look only at their arguments and run before any
//! storage access. Signup validation stops at the first failing rule, checking
//! fields in a fixed order:
//!
//! 1. name (signup only)
//! 2. email
//! 3. password
//! 4. password confirmation (signup only)
//!
//! Login only checks that both fields are present; the account lookup and
//! password verification do the rest.

mod errors;


pub use errors::ValidationError;

use crate::constants::{NAME_MAX_LEN, NAME_MIN_LEN, NOTE_MAX_LEN, PASSWORD_MIN_LEN};

/// Result of a validation check.
pub type ValidationResult = std::result::Result<(), ValidationError>;

/// Validate a set of credentials.
///
/// `name` and `confirm_password` are checked only when present, which is how
/// the signup flow differs from a bare credential check.
pub fn validate_credentials(
    email: &str,
    password: &str,
    name: Option<&str>,
    confirm_password: Option<&str>,
) -> ValidationResult {
    if let Some(name) = name {
        validate_name(name)?;
    }
    validate_email(email)?;
    validate_password(password)?;
    if let Some(confirm) = confirm_password {
        validate_confirmation(password, confirm)?;
    }
    Ok(())
}

/// Validate a full signup form.
pub fn validate_signup(
    email: &str,
    name: &str,
    password: &str,
    confirm_password: &str,
) -> ValidationResult {
    validate_credentials(email, password, Some(name), Some(confirm_password))
}

/// Validate a login form: both fields must be present.
pub fn validate_login(email: &str, password: &str) -> ValidationResult {
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::LoginFieldsRequired);
    }
    Ok(())
}

/// Validate a display name.
pub fn validate_name(name: &str) -> ValidationResult {
    if name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }
    let len = name.chars().count();
    if len < NAME_MIN_LEN {
        return Err(ValidationError::NameTooShort { min: NAME_MIN_LEN });
    }
    if len > NAME_MAX_LEN {
        return Err(ValidationError::NameTooLong { max: NAME_MAX_LEN });
    }
    // `_` and `-` are allowed as separators, but a name made only of them is not.
    let mut core = name.chars().filter(|c| *c != '_' && *c != '-').peekable();
    if core.peek().is_none() || !core.all(char::is_alphanumeric) {
        return Err(ValidationError::NameInvalidCharacters);
    }
    Ok(())
}

/// Validate an email address.
///
/// Deliberately loose: an `@` with a dotted domain part after the last `@`.
pub fn validate_email(email: &str) -> ValidationResult {
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    match email.rsplit_once('@') {
        Some((_, domain)) if domain.contains('.') => Ok(()),
        _ => Err(ValidationError::EmailInvalid),
    }
}

/// Validate password strength.
pub fn validate_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: PASSWORD_MIN_LEN,
        });
    }
    if password.chars().all(char::is_numeric) || password.chars().all(char::is_alphabetic) {
        return Err(ValidationError::PasswordNeedsLettersAndNumbers);
    }
    if password.to_lowercase() == password || password.to_uppercase() == password {
        return Err(ValidationError::PasswordNeedsMixedCase);
    }
    Ok(())
}

/// Validate the repeated password of a signup form.
pub fn validate_confirmation(password: &str, confirm_password: &str) -> ValidationResult {
    if confirm_password.is_empty() {
        return Err(ValidationError::ConfirmPasswordRequired);
    }
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Validate the text of a new note.
pub fn validate_note_text(text: &str) -> ValidationResult {
    if text.is_empty() {
        return Err(ValidationError::EmptyNote);
    }
    validate_note_length(text)
}

/// Validate only the upper bound on note text.
///
/// Edits go through this check alone: an edit may blank a note.
pub fn validate_note_length(text: &str) -> ValidationResult {
    if text.chars().count() > NOTE_MAX_LEN {
        return Err(ValidationError::NoteTooLong { max: NOTE_MAX_LEN });
    }
    Ok(())
}
