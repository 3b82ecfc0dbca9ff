//! Validation failures.
//!
//! Each variant's `Display` text is the message shown to the user, so the web
//! layer can surface it without translating.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required.")]
    NameRequired,

    #[error("Name must be at least {min} characters.")]
    NameTooShort { min: usize },

    #[error("Name must be under {max} characters.")]
    NameTooLong { max: usize },

    #[error("Name may contain letters, numbers, underscores, or hyphens only.")]
    NameInvalidCharacters,

    #[error("Email is required.")]
    EmailRequired,

    #[error("Invalid email format.")]
    EmailInvalid,

    #[error("Password is required.")]
    PasswordRequired,

    #[error("Password must be at least {min} characters.")]
    PasswordTooShort { min: usize },

    #[error("Password must include letters and numbers.")]
    PasswordNeedsLettersAndNumbers,

    #[error("Password must include uppercase and lowercase letters.")]
    PasswordNeedsMixedCase,

    #[error("Confirm password is required.")]
    ConfirmPasswordRequired,

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Email and password are required.")]
    LoginFieldsRequired,

    #[error("Note is too short!")]
    EmptyNote,

    #[error("Note must be at most {max} characters.")]
    NoteTooLong { max: usize },
}

impl ValidationError {
    /// Check if this error is about a signup/login form field.
    pub fn is_credential_error(&self) -> bool {
        !self.is_note_error()
    }

    /// Check if this error is about note text.
    pub fn is_note_error(&self) -> bool {
        matches!(
            self,
            ValidationError::EmptyNote | ValidationError::NoteTooLong { .. }
        )
    }
}
