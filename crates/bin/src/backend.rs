//! Backend creation from CLI configuration.

use std::path::Path;

use jotter::backend::{BackendImpl, InMemory, Sqlite};

use crate::cli::{Backend, ServeArgs};

/// SQLite database file name inside the data directory
pub const SQLITE_FILE: &str = "jotter.db";
/// In-memory snapshot file name inside the data directory
pub const SNAPSHOT_FILE: &str = "jotter.json";

/// Path of the in-memory snapshot for a data directory
pub fn snapshot_path(data_dir: &Path) -> std::path::PathBuf {
    data_dir.join(SNAPSHOT_FILE)
}

/// Create the appropriate backend based on configuration
pub async fn create_backend(
    args: &ServeArgs,
) -> Result<Box<dyn BackendImpl>, Box<dyn std::error::Error>> {
    // Ensure data directory exists
    tokio::fs::create_dir_all(&args.data_dir).await?;

    match args.backend {
        Backend::Sqlite => {
            let db_path = args.data_dir.join(SQLITE_FILE);
            tracing::info!("Using SQLite backend at {}", db_path.display());
            Ok(Box::new(Sqlite::open(&db_path).await?))
        }
        Backend::Inmemory => {
            let json_path = snapshot_path(&args.data_dir);
            tracing::info!(
                "Using in-memory backend with persistence at {}",
                json_path.display()
            );
            // A snapshot that exists but cannot be read is an error: starting
            // empty would overwrite it on shutdown.
            let backend = InMemory::load_from_file(&json_path).await?;
            tracing::info!(
                users = backend.user_count().await,
                notes = backend.note_count().await,
                "Loaded in-memory store"
            );
            Ok(Box::new(backend))
        }
    }
}
