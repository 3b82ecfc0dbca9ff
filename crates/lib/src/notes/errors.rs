//! Error types for note operations

use thiserror::Error;

use super::types::NoteId;
use crate::user::UserId;

#[derive(Error, Debug)]
pub enum NoteError {
    #[error("Note not found: {id}")]
    NotFound { id: NoteId },

    #[error("Note {id} is not owned by user {requester}")]
    NotOwner { id: NoteId, requester: UserId },
}

impl NoteError {
    /// Check if this error indicates the note was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, NoteError::NotFound { .. })
    }

    /// Check if this error is an ownership refusal.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, NoteError::NotOwner { .. })
    }
}
