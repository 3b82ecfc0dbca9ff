//! SQLite backend implementation for Jotter storage.
//!
//! This module provides a SQL database backend that implements the
//! `BackendImpl` trait using sqlx's SQLite driver.
//!
//! ## Schema and Migrations
//!
//! The database schema is defined in the [`schema`] module and automatically
//! initialized when connecting. Migrations are code-based functions keyed on
//! the stored schema version.
//!
//! See [`schema`] module documentation for details on adding migrations.

mod notes;
mod users;

/// Schema definition and migration system.
pub mod schema;

use std::any::Any;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use tracing::debug;

use crate::Result;
use crate::backend::BackendImpl;
use crate::backend::errors::BackendError;
use crate::notes::{NewNote, Note, NoteId};
use crate::user::{NewUser, User, UserId};

/// Extension trait for sqlx Result types to simplify error handling.
///
/// Similar to `anyhow::Context`, this trait adds a method to convert
/// sqlx errors to `BackendError::SqlxError` with a context message.
pub(crate) trait SqlxResultExt<T> {
    /// Convert sqlx error to BackendError with context message.
    fn sql_context(self, context: &str) -> Result<T>;
}

impl<T> SqlxResultExt<T> for std::result::Result<T, sqlx::Error> {
    fn sql_context(self, context: &str) -> Result<T> {
        self.map_err(|e| {
            BackendError::SqlxError {
                reason: format!("{context}: {e}"),
                source: Some(e),
            }
            .into()
        })
    }
}

/// Whether a sqlx error is a UNIQUE constraint failure.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Whether a sqlx error is a FOREIGN KEY constraint failure.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

/// SQLite-backed storage implementing `BackendImpl`.
///
/// # Thread Safety
///
/// `Sqlite` is `Send + Sync` as required by `BackendImpl`. The underlying
/// sqlx pool handles connection pooling and thread safety.
#[derive(Debug, Clone)]
pub struct Sqlite {
    pool: SqlitePool,
}

impl Sqlite {
    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Open a SQLite database at the given path.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use jotter::backend::Sqlite;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let backend = Sqlite::open("jotter.db").await.unwrap();
    /// }
    /// ```
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // - journal_mode=WAL: Write-Ahead Logging for better concurrency
        // - synchronous=NORMAL: Balanced durability (safe with WAL)
        // - busy_timeout=5s: Wait for locks before failing
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .sql_context("Failed to connect to SQLite")?;

        debug!(path = %path.display(), "Opened SQLite database");
        Self::from_pool(pool).await
    }

    /// Create an in-memory SQLite database.
    ///
    /// The database exists only for the lifetime of this backend instance.
    /// Useful for testing.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .sql_context("Invalid SQLite URL")?
            .foreign_keys(true);

        // Every connection to `sqlite::memory:` is its own database, and the
        // data is lost when the last connection closes. Pin exactly one.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .sql_context("Failed to connect to SQLite")?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self> {
        let backend = Self { pool };
        schema::initialize(&backend).await?;
        Ok(backend)
    }

    /// Close every pooled connection, flushing the WAL.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl BackendImpl for Sqlite {
    async fn insert_user(&self, user: NewUser) -> Result<User> {
        users::insert(self, user).await
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        users::get(self, id).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        users::find_by_email(self, email).await
    }

    async fn insert_note(&self, note: NewNote) -> Result<Note> {
        notes::insert(self, note).await
    }

    async fn get_note(&self, id: NoteId) -> Result<Option<Note>> {
        notes::get(self, id).await
    }

    async fn list_notes(&self, owner: UserId) -> Result<Vec<Note>> {
        notes::list(self, owner).await
    }

    async fn update_note(&self, id: NoteId, owner: UserId, data: &str) -> Result<Option<Note>> {
        notes::update(self, id, owner, data).await
    }

    async fn delete_note(&self, id: NoteId, owner: UserId) -> Result<bool> {
        notes::delete(self, id, owner).await
    }

    fn kind(&self) -> &'static str {
        "sqlite"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
