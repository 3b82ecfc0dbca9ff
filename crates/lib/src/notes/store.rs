//! Note operations scoped to the acting user.

use tracing::debug;

use super::errors::NoteError;
use super::types::{NewNote, Note, NoteId};
use crate::Result;
use crate::backend::BackendImpl;
use crate::clock::Clock;
use crate::user::UserId;
use crate::validation::{validate_note_length, validate_note_text};

/// Ownership check shared by every note mutation.
///
/// A pure function of its arguments: the requester must be the note's owner.
pub fn ensure_owner(note: &Note, requester: UserId) -> std::result::Result<(), NoteError> {
    if note.is_owned_by(requester) {
        Ok(())
    } else {
        Err(NoteError::NotOwner {
            id: note.id,
            requester,
        })
    }
}

/// Adds, lists, edits and deletes notes.
///
/// Borrowed from an [`Instance`](crate::Instance) via `notes()`. Every method
/// takes the acting user explicitly.
pub struct NoteStore<'a> {
    backend: &'a dyn BackendImpl,
    clock: &'a dyn Clock,
}

impl<'a> NoteStore<'a> {
    pub(crate) fn new(backend: &'a dyn BackendImpl, clock: &'a dyn Clock) -> Self {
        Self { backend, clock }
    }

    /// Store a new note for `owner`, dated now.
    pub async fn add_note(&self, owner: UserId, text: &str) -> Result<Note> {
        validate_note_text(text)?;

        let note = self
            .backend
            .insert_note(NewNote {
                data: text.to_string(),
                date: self.clock.now(),
                user_id: owner,
            })
            .await?;

        debug!(note_id = %note.id, user_id = %owner, "Added note");
        Ok(note)
    }

    /// All notes owned by `owner`, oldest first.
    pub async fn list_notes(&self, owner: UserId) -> Result<Vec<Note>> {
        self.backend.list_notes(owner).await
    }

    /// Fetch one note on behalf of `requester`.
    pub async fn get_note(&self, requester: UserId, id: NoteId) -> Result<Note> {
        let note = self
            .backend
            .get_note(id)
            .await?
            .ok_or(NoteError::NotFound { id })?;
        ensure_owner(&note, requester)?;
        Ok(note)
    }

    /// Replace the text of a note owned by `requester`.
    ///
    /// Fails with `NoteError::NotFound` or `NoteError::NotOwner`; the note's
    /// id and date are left as they were.
    pub async fn edit_note(&self, requester: UserId, id: NoteId, new_text: &str) -> Result<Note> {
        validate_note_length(new_text)?;
        self.get_note(requester, id).await?;

        // The update is filtered by owner as well, so a note deleted since the
        // check above comes back as not found.
        let note = self
            .backend
            .update_note(id, requester, new_text)
            .await?
            .ok_or(NoteError::NotFound { id })?;

        debug!(note_id = %id, user_id = %requester, "Edited note");
        Ok(note)
    }

    /// Delete a note owned by `requester`.
    ///
    /// A missing or foreign note is ignored: the call succeeds and nothing
    /// changes. Only storage failures are reported.
    pub async fn delete_note(&self, requester: UserId, id: NoteId) -> Result<()> {
        let Some(note) = self.backend.get_note(id).await? else {
            debug!(note_id = %id, user_id = %requester, "Ignoring delete of missing note");
            return Ok(());
        };

        if let Err(e) = ensure_owner(&note, requester) {
            debug!(note_id = %id, user_id = %requester, "Ignoring delete: {e}");
            return Ok(());
        }

        if self.backend.delete_note(id, requester).await? {
            debug!(note_id = %id, user_id = %requester, "Deleted note");
        }
        Ok(())
    }
}
