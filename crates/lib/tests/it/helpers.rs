#![allow(dead_code)]

use std::sync::Arc;

use jotter::{FixedClock, Instance, User, backend::BackendImpl, backend::InMemory};

// Re-export tokio test macro for convenience
pub use tokio;

/// A password that passes every strength rule.
pub const PASSWORD: &str = "Secret123";

// ==========================
// CORE TEST FACTORIES
// ==========================
// These are the foundation for all test setup. They provide a single point of change
// for backend matrix testing via TEST_BACKEND env var.

/// Creates a test backend based on TEST_BACKEND env var.
///
/// Supported values:
/// - "inmemory" or unset: InMemory backend (default)
/// - "sqlite": SQLite in-memory backend (requires `sqlite` feature)
///
/// # Example
/// ```bash
/// # Run tests with InMemory (default)
/// cargo test
///
/// # Run tests with SQLite
/// TEST_BACKEND=sqlite cargo test
/// ```
pub async fn test_backend() -> Box<dyn BackendImpl> {
    match std::env::var("TEST_BACKEND").as_deref() {
        Ok("sqlite") => {
            #[cfg(feature = "sqlite")]
            {
                use jotter::backend::Sqlite;
                Box::new(
                    Sqlite::in_memory()
                        .await
                        .expect("Failed to create SQLite backend"),
                )
            }
            #[cfg(not(feature = "sqlite"))]
            {
                panic!("TEST_BACKEND=sqlite requires the 'sqlite' feature to be enabled")
            }
        }
        Ok("inmemory") | Ok("") | Err(_) => Box::new(InMemory::new()),
        Ok(other) => {
            panic!("Unknown TEST_BACKEND value: {other}. Supported: inmemory, sqlite")
        }
    }
}

/// Creates an Instance with no users.
///
/// Uses a [`FixedClock`] for controllable timestamps in tests.
pub async fn test_instance() -> Instance {
    let clock = Arc::new(FixedClock::default());
    Instance::open_with_clock(test_backend().await, clock)
}

/// Like [`test_instance`], but also hands back the clock.
pub async fn test_instance_with_clock() -> (Instance, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::default());
    let instance = Instance::open_with_clock(test_backend().await, clock.clone());
    (instance, clock)
}

/// Register `<name>@example.com` with the shared test password.
pub async fn register(instance: &Instance, name: &str) -> User {
    instance
        .accounts()
        .sign_up(&format!("{name}@example.com"), name, PASSWORD, PASSWORD)
        .await
        .expect("Failed to register user")
}

/// Creates an Instance with one registered user (most common test pattern)
pub async fn test_instance_with_user(name: &str) -> (Instance, User) {
    let instance = test_instance().await;
    let user = register(&instance, name).await;
    (instance, user)
}

/// Creates an Instance with two registered users.
pub async fn test_instance_with_two_users() -> (Instance, User, User) {
    let instance = test_instance().await;
    let alice = register(&instance, "alice").await;
    let bob = register(&instance, "bob").await;
    (instance, alice, bob)
}
