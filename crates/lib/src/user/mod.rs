//! Account system for Jotter
//!
//! Provides email/password accounts with Argon2id password storage and the
//! [`Identity`] contract the session layer relies on.

pub mod crypto;
mod directory;
pub mod errors;
pub mod types;

pub use directory::AccountDirectory;
pub use errors::UserError;
pub use types::*;
