//! Note records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserId;

/// Identifier of a stored note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub i64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(NoteId)
    }
}

/// A short text note owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub data: String,
    /// Creation time; never changes after insert.
    pub date: DateTime<Utc>,
    /// The owner, and the only user allowed to see or change this note.
    pub user_id: UserId,
}

impl Note {
    /// Check whether `user` owns this note.
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.user_id == user
    }
}

/// A note that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub data: String,
    pub date: DateTime<Utc>,
    pub user_id: UserId,
}

impl NewNote {
    /// Attach the id assigned by the backend.
    pub fn into_note(self, id: NoteId) -> Note {
        Note {
            id,
            data: self.data,
            date: self.date,
            user_id: self.user_id,
        }
    }
}
