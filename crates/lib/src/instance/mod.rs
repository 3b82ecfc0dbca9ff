//! Provides [`Instance`], the explicitly constructed service handle.
//!
//! `Instance` owns the storage backend and the clock, and hands out the
//! account and note services borrowed from them. There is no global state:
//! every caller that needs storage goes through an `Instance` it was given.

use std::sync::Arc;

use crate::{
    Clock, SystemClock,
    backend::BackendImpl,
    notes::NoteStore,
    user::AccountDirectory,
};

/// Internal state for Instance
///
/// Instance itself is just a cheap-to-clone handle wrapping `Arc<InstanceInternal>`.
pub(crate) struct InstanceInternal {
    /// The storage backend
    backend: Box<dyn BackendImpl>,
    /// Time provider for note dates
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for InstanceInternal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceInternal")
            .field("backend", &self.backend.kind())
            .field("clock", &self.clock)
            .finish()
    }
}

/// Service handle on top of the storage backend.
///
/// Instance is a cheap-to-clone handle around `Arc<InstanceInternal>`, so it
/// can sit in shared web-server state.
///
/// ## Example
///
/// ```
/// # use jotter::{backend::InMemory, Instance};
/// # #[tokio::main]
/// # async fn main() -> jotter::Result<()> {
/// let instance = Instance::open(Box::new(InMemory::new()));
///
/// let alice = instance
///     .accounts()
///     .sign_up("alice@example.com", "alice", "Secret123", "Secret123")
///     .await?;
/// instance.notes().add_note(alice.id, "buy milk").await?;
///
/// let notes = instance.notes().list_notes(alice.id).await?;
/// assert_eq!(notes.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Instance {
    inner: Arc<InstanceInternal>,
}

impl Instance {
    /// Wrap a backend, dating notes with the system clock.
    pub fn open(backend: Box<dyn BackendImpl>) -> Self {
        Self::with_clock(backend, Arc::new(SystemClock))
    }

    /// Wrap a backend with a custom clock.
    ///
    /// Tests use this with a [`FixedClock`](crate::FixedClock) for
    /// deterministic note dates.
    #[cfg(any(test, feature = "testing"))]
    pub fn open_with_clock(backend: Box<dyn BackendImpl>, clock: Arc<dyn Clock>) -> Self {
        Self::with_clock(backend, clock)
    }

    fn with_clock(backend: Box<dyn BackendImpl>, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(InstanceInternal { backend, clock }),
        }
    }

    /// Get a reference to the backend
    pub fn backend(&self) -> &dyn BackendImpl {
        self.inner.backend.as_ref()
    }

    /// Get the clock used for note dates
    pub fn clock(&self) -> &dyn Clock {
        self.inner.clock.as_ref()
    }

    /// Account registration and sign-in.
    pub fn accounts(&self) -> AccountDirectory<'_> {
        AccountDirectory::new(self.backend())
    }

    /// Note operations.
    pub fn notes(&self) -> NoteStore<'_> {
        NoteStore::new(self.backend(), self.clock())
    }
}
