//! Backend implementations for Jotter storage
//!
//! This module provides the [`BackendImpl`] trait and its implementations.
//! The trait covers exactly the record operations the account and note
//! layers need, so `AccountDirectory` and `NoteStore` stay independent of the
//! storage mechanism.
//!
//! Each method is atomic: a multi-statement write either fully applies or
//! leaves storage unchanged.

use std::any::Any;

use async_trait::async_trait;

use crate::Result;
use crate::notes::{NewNote, Note, NoteId};
use crate::user::{NewUser, User, UserId};

pub mod database;
pub mod errors;

pub use database::InMemory;
#[cfg(feature = "sqlite")]
pub use database::Sqlite;
pub use errors::BackendError;

/// Storage interface for users and notes.
///
/// All backends must be `Send` and `Sync` to allow sharing across request
/// handlers, and implement `Any` to allow downcasting (used to snapshot an
/// [`InMemory`] backend on shutdown).
#[async_trait]
pub trait BackendImpl: Send + Sync + Any {
    /// Store a new user and assign its id.
    ///
    /// Returns `BackendError::EmailTaken` if the email is already stored.
    async fn insert_user(&self, user: NewUser) -> Result<User>;

    /// Retrieve a user by id, or `None` if absent.
    async fn get_user(&self, id: UserId) -> Result<Option<User>>;

    /// Retrieve a user by exact email, or `None` if absent.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Store a new note and assign its id.
    ///
    /// Returns `BackendError::UserNotFound` if the owner does not exist.
    async fn insert_note(&self, note: NewNote) -> Result<Note>;

    /// Retrieve a note by id, regardless of owner.
    async fn get_note(&self, id: NoteId) -> Result<Option<Note>>;

    /// All notes owned by `owner`, ordered by id.
    async fn list_notes(&self, owner: UserId) -> Result<Vec<Note>>;

    /// Replace the text of note `id` if it is owned by `owner`.
    ///
    /// Returns the updated note, or `None` if no note with that id and owner
    /// exists. The date is never changed.
    async fn update_note(&self, id: NoteId, owner: UserId, data: &str) -> Result<Option<Note>>;

    /// Remove note `id` if it is owned by `owner`.
    ///
    /// Returns whether a note was removed.
    async fn delete_note(&self, id: NoteId, owner: UserId) -> Result<bool>;

    /// Short name of the storage kind, reported by the health endpoint.
    fn kind(&self) -> &'static str;

    /// Returns a reference to the backend instance as a dynamic `Any` type.
    ///
    /// This allows for downcasting to a concrete backend implementation if necessary,
    /// enabling access to implementation-specific methods. Use with caution.
    fn as_any(&self) -> &dyn Any;
}
