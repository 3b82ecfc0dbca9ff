//! Error types for the account system
//!
//! The `Display` text of the sign-in failures is what the login and sign-up
//! pages show, so it stays short and does not echo the email back.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("Email already exists. Try logging in instead.")]
    DuplicateEmail { email: String },

    #[error("User does not exist.")]
    UnknownEmail { email: String },

    #[error("Incorrect password.")]
    BadPassword,

    #[error("Password hashing failed: {reason}")]
    PasswordHashing { reason: String },

    #[error("Stored password hash is malformed")]
    MalformedPasswordHash,
}

impl UserError {
    /// Check if this error indicates the account was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, UserError::UnknownEmail { .. })
    }

    /// Check if this error indicates the account already exists.
    pub fn is_conflict(&self) -> bool {
        matches!(self, UserError::DuplicateEmail { .. })
    }

    /// Check if this error is a failed sign-in attempt.
    pub fn is_authentication_error(&self) -> bool {
        matches!(
            self,
            UserError::UnknownEmail { .. } | UserError::BadPassword
        )
    }
}
