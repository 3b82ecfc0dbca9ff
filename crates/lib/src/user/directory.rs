//! Account registration and sign-in.

use tracing::{debug, info};

use super::crypto::{hash_password, verify_password};
use super::errors::UserError;
use super::types::{NewUser, User, UserId};
use crate::Result;
use crate::backend::BackendImpl;
use crate::validation::validate_signup;

/// Registers and authenticates accounts.
///
/// Borrowed from an [`Instance`](crate::Instance) via `accounts()`.
pub struct AccountDirectory<'a> {
    backend: &'a dyn BackendImpl,
}

impl<'a> AccountDirectory<'a> {
    pub(crate) fn new(backend: &'a dyn BackendImpl) -> Self {
        Self { backend }
    }

    /// Validate a signup form and register the account it describes.
    ///
    /// Validation failures are reported before any storage access.
    pub async fn sign_up(
        &self,
        email: &str,
        name: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<User> {
        validate_signup(email, name, password, confirm_password)?;
        self.register(email, name, password).await
    }

    /// Create a new account.
    ///
    /// Fails with `UserError::DuplicateEmail` when the email is taken. The
    /// backend repeats the uniqueness check inside the insert transaction, so
    /// a concurrent registration of the same email fails the same way.
    pub async fn register(&self, email: &str, name: &str, password: &str) -> Result<User> {
        if self.backend.find_user_by_email(email).await?.is_some() {
            return Err(UserError::DuplicateEmail {
                email: email.to_string(),
            }
            .into());
        }

        let new_user = NewUser {
            email: email.to_string(),
            name: name.to_string(),
            password_hash: hash_password(password)?,
        };

        match self.backend.insert_user(new_user).await {
            Ok(user) => {
                info!(user_id = %user.id, "Registered new user");
                Ok(user)
            }
            Err(e) if e.is_conflict() => Err(UserError::DuplicateEmail {
                email: email.to_string(),
            }
            .into()),
            Err(e) => Err(e),
        }
    }

    /// Check an email/password pair and return the matching account.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let Some(user) = self.backend.find_user_by_email(email).await? else {
            debug!("Login attempt for unknown email");
            return Err(UserError::UnknownEmail {
                email: email.to_string(),
            }
            .into());
        };

        if let Err(e) = verify_password(password, &user.password_hash) {
            debug!(user_id = %user.id, "Login attempt with bad password");
            return Err(e);
        }

        info!(user_id = %user.id, "User authenticated");
        Ok(user)
    }

    /// Load an account by id.
    pub async fn get(&self, id: UserId) -> Result<Option<User>> {
        self.backend.get_user(id).await
    }
}
