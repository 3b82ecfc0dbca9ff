//! Core data types for the account system

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stable identifier of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(UserId)
    }
}

impl UserId {
    /// Recover an id from a value produced by [`Identity::session_key`].
    pub fn from_session_key(key: &str) -> Option<Self> {
        key.parse().ok()
    }
}

/// What the session layer needs from an authenticated principal.
///
/// A stable identifier, and a string form of it that survives a round trip
/// through session storage.
pub trait Identity {
    /// The account this principal acts as.
    fn user_id(&self) -> UserId;

    /// Value stored in a session to remember this principal.
    fn session_key(&self) -> String {
        self.user_id().to_string()
    }
}

impl Identity for UserId {
    fn user_id(&self) -> UserId {
        *self
    }
}

/// A registered account, as stored.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Unique across all users, compared case-sensitively.
    pub email: String,
    pub name: String,
    /// Argon2id PHC string.
    pub password_hash: String,
}

impl Identity for User {
    fn user_id(&self) -> UserId {
        self.id
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// A user that has not been stored yet.
#[derive(Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

impl NewUser {
    /// Attach the id assigned by the backend.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            email: self.email,
            name: self.name,
            password_hash: self.password_hash,
        }
    }
}
