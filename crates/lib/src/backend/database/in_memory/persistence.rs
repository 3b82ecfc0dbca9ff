//! Persistence operations for InMemory database
//!
//! This module handles serialization and file I/O for saving/loading
//! the in-memory database state to/from JSON files.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tokio::sync::RwLock;

use super::{InMemory, Tables};
use crate::{
    Error, Result,
    backend::errors::BackendError,
    notes::Note,
    user::User,
};

/// The current persistence file format version.
/// v0 indicates this is an unstable format subject to breaking changes.
const PERSISTENCE_VERSION: u8 = 0;

/// Helper to check if version is default (0) for serde skip_serializing_if
fn is_v0(v: &u8) -> bool {
    *v == 0
}

/// Validates the persistence version during deserialization.
fn validate_persistence_version<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let version = u8::deserialize(deserializer)?;
    if version != PERSISTENCE_VERSION {
        return Err(serde::de::Error::custom(format!(
            "unsupported persistence version {version}; only version {PERSISTENCE_VERSION} is supported"
        )));
    }
    Ok(version)
}

/// Serializable snapshot of an InMemory database
#[derive(Serialize, Deserialize)]
struct Snapshot {
    /// File format version for compatibility checking
    #[serde(
        rename = "_v",
        default,
        skip_serializing_if = "is_v0",
        deserialize_with = "validate_persistence_version"
    )]
    version: u8,
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    notes: Vec<Note>,
    next_user_id: i64,
    next_note_id: i64,
}

impl Snapshot {
    fn into_tables(self) -> Result<Tables> {
        let mut tables = Tables {
            next_user_id: self.next_user_id,
            next_note_id: self.next_note_id,
            ..Tables::default()
        };

        for user in self.users {
            if user.id.0 >= tables.next_user_id {
                return Err(BackendError::CorruptRow {
                    reason: format!("user id {} is not below the id counter", user.id),
                }
                .into());
            }
            tables.users.insert(user.id, user);
        }

        for note in self.notes {
            if note.id.0 >= tables.next_note_id {
                return Err(BackendError::CorruptRow {
                    reason: format!("note id {} is not below the id counter", note.id),
                }
                .into());
            }
            if !tables.users.contains_key(&note.user_id) {
                return Err(BackendError::CorruptRow {
                    reason: format!("note {} references missing user {}", note.id, note.user_id),
                }
                .into());
            }
            tables.notes.insert(note.id, note);
        }

        Ok(tables)
    }
}

/// Saves both tables and their id counters to a specified file as JSON.
pub(crate) async fn save_to_file<P: AsRef<Path>>(backend: &InMemory, path: P) -> Result<()> {
    let snapshot = {
        let tables = backend.tables.read().await;
        Snapshot {
            version: PERSISTENCE_VERSION,
            users: tables.users.values().cloned().collect(),
            notes: tables.notes.values().cloned().collect(),
            next_user_id: tables.next_user_id,
            next_note_id: tables.next_note_id,
        }
    };

    let json = serde_json::to_string_pretty(&snapshot)
        .map_err(|e| -> Error { BackendError::SerializationFailed { source: e }.into() })?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| -> Error { BackendError::FileIo { source: e }.into() })
}

/// Loads the database state from a specified JSON file.
///
/// If the file does not exist, a new, empty `InMemory` database is returned.
pub(crate) async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<InMemory> {
    match tokio::fs::read_to_string(path).await {
        Ok(json) => {
            let snapshot: Snapshot = serde_json::from_str(&json).map_err(|e| -> Error {
                BackendError::DeserializationFailed { source: e }.into()
            })?;
            Ok(InMemory {
                tables: RwLock::new(snapshot.into_tables()?),
            })
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(InMemory::new()),
        Err(e) => Err(BackendError::FileIo { source: e }.into()),
    }
}
