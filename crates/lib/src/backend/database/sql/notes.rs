//! Note table operations.
//!
//! Dates are stored as milliseconds since the Unix epoch.

use chrono::DateTime;

use crate::Result;
use crate::backend::errors::BackendError;
use crate::notes::{NewNote, Note, NoteId};
use crate::user::UserId;

use super::{Sqlite, SqlxResultExt, is_foreign_key_violation};

type NoteRow = (i64, String, i64, i64);

fn from_row((id, data, date, user_id): NoteRow) -> Result<Note> {
    let date = DateTime::from_timestamp_millis(date).ok_or_else(|| BackendError::CorruptRow {
        reason: format!("note {id} has out-of-range date {date}"),
    })?;

    Ok(Note {
        id: NoteId(id),
        data,
        date,
        user_id: UserId(user_id),
    })
}

/// Insert a note, failing with `UserNotFound` if the owner is missing.
pub async fn insert(backend: &Sqlite, note: NewNote) -> Result<Note> {
    let inserted: std::result::Result<(i64,), sqlx::Error> =
        sqlx::query_as("INSERT INTO note (data, date, user_id) VALUES (?, ?, ?) RETURNING id")
            .bind(&note.data)
            .bind(note.date.timestamp_millis())
            .bind(note.user_id.0)
            .fetch_one(backend.pool())
            .await;

    match inserted {
        Ok((id,)) => Ok(note.into_note(NoteId(id))),
        Err(e) if is_foreign_key_violation(&e) => {
            Err(BackendError::UserNotFound { id: note.user_id }.into())
        }
        Err(e) => Err(e).sql_context("Failed to insert note"),
    }
}

/// Get a note by id.
pub async fn get(backend: &Sqlite, id: NoteId) -> Result<Option<Note>> {
    let row: Option<NoteRow> =
        sqlx::query_as("SELECT id, data, date, user_id FROM note WHERE id = ?")
            .bind(id.0)
            .fetch_optional(backend.pool())
            .await
            .sql_context("Failed to get note")?;

    row.map(from_row).transpose()
}

/// All notes owned by `owner`, ordered by id.
pub async fn list(backend: &Sqlite, owner: UserId) -> Result<Vec<Note>> {
    let rows: Vec<NoteRow> =
        sqlx::query_as("SELECT id, data, date, user_id FROM note WHERE user_id = ? ORDER BY id")
            .bind(owner.0)
            .fetch_all(backend.pool())
            .await
            .sql_context("Failed to list notes")?;

    rows.into_iter().map(from_row).collect()
}

/// Replace the text of a note owned by `owner`.
pub async fn update(
    backend: &Sqlite,
    id: NoteId,
    owner: UserId,
    data: &str,
) -> Result<Option<Note>> {
    let row: Option<NoteRow> = sqlx::query_as(
        "UPDATE note SET data = ? WHERE id = ? AND user_id = ? RETURNING id, data, date, user_id",
    )
    .bind(data)
    .bind(id.0)
    .bind(owner.0)
    .fetch_optional(backend.pool())
    .await
    .sql_context("Failed to update note")?;

    row.map(from_row).transpose()
}

/// Delete a note owned by `owner`.
pub async fn delete(backend: &Sqlite, id: NoteId, owner: UserId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM note WHERE id = ? AND user_id = ?")
        .bind(id.0)
        .bind(owner.0)
        .execute(backend.pool())
        .await
        .sql_context("Failed to delete note")?;

    Ok(result.rows_affected() > 0)
}
