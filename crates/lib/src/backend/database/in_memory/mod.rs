//! In-memory database backend implementation
//!
//! This module provides an in-memory implementation of the BackendImpl trait,
//! suitable for testing, development, or single-process deployments that can
//! snapshot their state to a JSON file on shutdown.

mod persistence;

use std::any::Any;
use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::Result;
use crate::backend::BackendImpl;
use crate::backend::errors::BackendError;
use crate::notes::{NewNote, Note, NoteId};
use crate::user::{NewUser, User, UserId};

/// Both tables plus their id counters, guarded together so every write is
/// atomic with respect to readers.
#[derive(Debug)]
pub(crate) struct Tables {
    pub(crate) users: BTreeMap<UserId, User>,
    pub(crate) notes: BTreeMap<NoteId, Note>,
    pub(crate) next_user_id: i64,
    pub(crate) next_note_id: i64,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            notes: BTreeMap::new(),
            next_user_id: 1,
            next_note_id: 1,
        }
    }
}

/// A simple in-memory database implementation using ordered maps for storage.
///
/// It provides basic persistence capabilities via `save_to_file` and
/// `load_from_file`, serializing both tables to JSON.
#[derive(Debug, Default)]
pub struct InMemory {
    pub(crate) tables: RwLock<Tables>,
}

impl InMemory {
    /// Creates a new, empty `InMemory` database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    /// Number of stored notes, across all users.
    pub async fn note_count(&self) -> usize {
        self.tables.read().await.notes.len()
    }

    /// Saves the entire database state to a specified file as JSON.
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        persistence::save_to_file(self, path).await
    }

    /// Loads the database state from a specified JSON file.
    ///
    /// If the file does not exist, a new, empty `InMemory` database is returned.
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        persistence::load_from_file(path).await
    }
}

#[async_trait]
impl BackendImpl for InMemory {
    async fn insert_user(&self, user: NewUser) -> Result<User> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.email == user.email) {
            return Err(BackendError::EmailTaken { email: user.email }.into());
        }

        let id = UserId(tables.next_user_id);
        tables.next_user_id += 1;
        let user = user.into_user(id);
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn insert_note(&self, note: NewNote) -> Result<Note> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&note.user_id) {
            return Err(BackendError::UserNotFound { id: note.user_id }.into());
        }

        let id = NoteId(tables.next_note_id);
        tables.next_note_id += 1;
        let note = note.into_note(id);
        tables.notes.insert(id, note.clone());
        Ok(note)
    }

    async fn get_note(&self, id: NoteId) -> Result<Option<Note>> {
        Ok(self.tables.read().await.notes.get(&id).cloned())
    }

    async fn list_notes(&self, owner: UserId) -> Result<Vec<Note>> {
        let tables = self.tables.read().await;
        Ok(tables
            .notes
            .values()
            .filter(|n| n.user_id == owner)
            .cloned()
            .collect())
    }

    async fn update_note(&self, id: NoteId, owner: UserId, data: &str) -> Result<Option<Note>> {
        let mut tables = self.tables.write().await;
        match tables.notes.get_mut(&id) {
            Some(note) if note.user_id == owner => {
                note.data = data.to_string();
                Ok(Some(note.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_note(&self, id: NoteId, owner: UserId) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.notes.get(&id).is_some_and(|n| n.user_id == owner) {
            tables.notes.remove(&id);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn kind(&self) -> &'static str {
        "inmemory"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
