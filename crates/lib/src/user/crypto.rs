//! Password hashing for the account system
//!
//! Passwords are stored as Argon2id PHC strings (`$argon2id$v=19$...`), which
//! carry their own random salt and parameters. Verification re-derives the hash
//! from the stored parameters and compares in constant time.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core},
};

use super::errors::UserError;
use crate::Result;

/// Hash a password using Argon2id with a fresh random salt
///
/// # Returns
/// The PHC-format hash string to store.
pub fn hash_password(password: impl AsRef<str>) -> Result<String> {
    let salt = SaltString::generate(&mut rand_core::OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_ref().as_bytes(), &salt)
        .map_err(|e| UserError::PasswordHashing {
            reason: e.to_string(),
        })?;

    Ok(hash.to_string())
}

/// Verify a password against its stored hash
///
/// # Returns
/// Ok(()) if the password is correct, `UserError::BadPassword` if it is not,
/// `UserError::MalformedPasswordHash` if the stored value cannot be parsed.
pub fn verify_password(password: impl AsRef<str>, password_hash: impl AsRef<str>) -> Result<()> {
    let parsed_hash =
        PasswordHash::new(password_hash.as_ref()).map_err(|_| UserError::MalformedPasswordHash)?;

    Argon2::default()
        .verify_password(password.as_ref().as_bytes(), &parsed_hash)
        .map_err(|_| UserError::BadPassword.into())
}
