//! Jotter: a small multi-user notes service.
//! This library provides the account, note and persistence layers that the `jotter` server binary is built on.
//!
//! ## Core Concepts
//!
//! * **Instance (`instance::Instance`)**: The explicitly constructed service handle. It owns a backend and a clock and hands out the two domain services below.
//! * **Account Directory (`user::AccountDirectory`)**: Registers users (unique email, Argon2id-hashed password) and authenticates them.
//! * **Note Store (`notes::NoteStore`)**: Adds, lists, edits and deletes notes. Every operation takes the acting user's id explicitly, and ownership is the only authorization rule.
//! * **Backends (`backend::BackendImpl`)**: A pluggable storage layer. `InMemory` keeps everything in lock-guarded maps with optional JSON snapshots; `Sqlite` persists to a local database file.
//! * **Validation (`validation`)**: Pure checks on signup/login fields and note text, run before any storage access.

pub mod backend;
pub mod clock;
pub mod constants;
pub mod instance;
pub mod notes;
pub mod user;
pub mod validation;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;
pub use instance::Instance;
pub use notes::{Note, NoteId};
pub use user::{Identity, User, UserId};

/// Result type used throughout the Jotter library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Jotter library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Input rejected by the credential or note validators
    #[error(transparent)]
    Validation(validation::ValidationError),

    /// Structured account errors from the user module
    #[error(transparent)]
    User(user::UserError),

    /// Structured note errors from the notes module
    #[error(transparent)]
    Note(notes::NoteError),

    /// Structured storage errors from the backend module
    #[error(transparent)]
    Backend(backend::BackendError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Validation(_) => "validation",
            Error::User(_) => "user",
            Error::Note(_) => "notes",
            Error::Backend(_) => "backend",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_not_found(),
            Error::Note(note_err) => note_err.is_not_found(),
            Error::Backend(backend_err) => backend_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error indicates a conflict (already exists).
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_conflict(),
            Error::Backend(backend_err) => backend_err.is_conflict(),
            _ => false,
        }
    }

    /// Check if this error is validation-related.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if this error is authentication-related.
    pub fn is_authentication_error(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_authentication_error(),
            _ => false,
        }
    }

    /// Check if this error is an ownership refusal.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Error::Note(note_err) => note_err.is_permission_denied(),
            _ => false,
        }
    }

    /// Check if this error came from the storage layer.
    ///
    /// These are the failures that roll back a transaction and are reported
    /// to users only as a generic message.
    pub fn is_persistence_error(&self) -> bool {
        match self {
            Error::Backend(backend_err) => !backend_err.is_conflict(),
            Error::Io(_) | Error::Serialize(_) => true,
            _ => false,
        }
    }

    /// The validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&validation::ValidationError> {
        match self {
            Error::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<validation::ValidationError> for Error {
    fn from(err: validation::ValidationError) -> Self {
        Error::Validation(err)
    }
}

impl From<user::UserError> for Error {
    fn from(err: user::UserError) -> Self {
        Error::User(err)
    }
}

impl From<notes::NoteError> for Error {
    fn from(err: notes::NoteError) -> Self {
        Error::Note(err)
    }
}

impl From<backend::BackendError> for Error {
    fn from(err: backend::BackendError) -> Self {
        Error::Backend(err)
    }
}
