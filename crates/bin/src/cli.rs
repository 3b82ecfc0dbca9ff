//! CLI argument definitions for the Jotter binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Storage backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// SQLite database file (default)
    Sqlite,
    /// In-memory with JSON persistence (for development and ephemeral deployments)
    Inmemory,
}

/// Jotter multi-user notes server
#[derive(Parser, Debug)]
#[command(name = "jotter")]
#[command(about = "Jotter: a small multi-user notes server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Jotter web server
    Serve(ServeArgs),
    /// Check health of a running Jotter server
    Health(HealthArgs),
}

/// Arguments for the serve command
#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 5000, env = "JOTTER_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(long, default_value = "127.0.0.1", env = "JOTTER_HOST")]
    pub host: String,

    /// Storage backend to use
    #[arg(short, long, value_enum, default_value_t = Backend::Sqlite, env = "JOTTER_BACKEND")]
    pub backend: Backend,

    /// Data directory for storage files.
    /// For SQLite: stores jotter.db
    /// For InMemory: stores jotter.json
    #[arg(short = 'D', long, default_value = ".", env = "JOTTER_DATA_DIR")]
    pub data_dir: PathBuf,
}

/// Arguments for the health command
#[derive(clap::Args, Debug)]
pub struct HealthArgs {
    /// Base URL of the server to check
    #[arg(short, long, default_value = "http://127.0.0.1:5000", env = "JOTTER_URL")]
    pub url: String,

    /// Timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,
}
