//! Session management for web interface
//!
//! Provides in-memory session storage mapping session tokens to the signed-in
//! user and any pending flash messages. Sessions idle for longer than the
//! store's timeout are pruned whenever a new session is created.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use jotter::{Identity, UserId};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Session token (UUID stored in cookie)
pub type SessionToken = String;

/// How long a session may go unused before it is dropped
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Flash message category, used as the CSS class when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }
}

/// A one-shot message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug)]
struct SessionState {
    /// `Identity::session_key` of the signed-in user; `None` once signed out.
    user_key: Option<String>,
    flashes: Vec<Flash>,
    last_seen: Instant,
}

/// In-memory session store
///
/// Sessions are ephemeral and lost on server restart.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, SessionState>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    /// Create a new empty session store
    pub fn new() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }

    /// Create a store whose sessions expire after `idle_timeout` without use
    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout,
        }
    }

    /// Create a new session for an authenticated principal
    ///
    /// # Returns
    /// The session token (UUID) to be stored in a cookie
    pub async fn create_session<I: Identity>(&self, identity: &I) -> SessionToken {
        let token = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, state| state.last_seen.elapsed() < self.idle_timeout);
        let pruned = before - sessions.len();
        if pruned > 0 {
            tracing::debug!(pruned, "Dropped idle sessions");
        }

        sessions.insert(
            token.clone(),
            SessionState {
                user_key: Some(identity.session_key()),
                flashes: Vec::new(),
                last_seen: Instant::now(),
            },
        );
        token
    }

    /// Get the signed-in user of a session, if any
    ///
    /// Marks the session as used. An idle session is dropped instead.
    pub async fn user_id(&self, token: &str) -> Option<UserId> {
        let mut sessions = self.sessions.write().await;
        let state = sessions.get_mut(token)?;
        if state.last_seen.elapsed() >= self.idle_timeout {
            sessions.remove(token);
            return None;
        }
        state.last_seen = Instant::now();
        let key = state.user_key.as_deref()?;
        UserId::from_session_key(key)
    }

    /// Detach the user from a session, keeping the token for flashes
    ///
    /// # Returns
    /// Whether a signed-in user was detached
    pub async fn sign_out(&self, token: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions
            .get_mut(token)
            .and_then(|state| state.user_key.take())
            .is_some()
    }

    /// Queue a flash message on a session
    ///
    /// Unknown tokens are ignored.
    pub async fn flash(&self, token: &str, flash: Flash) {
        let mut sessions = self.sessions.write().await;
        if let Some(state) = sessions.get_mut(token) {
            state.flashes.push(flash);
        }
    }

    /// Remove and return all pending flash messages
    ///
    /// A signed-out session has nothing left to carry once its flashes are
    /// taken, so it is dropped.
    pub async fn take_flashes(&self, token: &str) -> Vec<Flash> {
        let mut sessions = self.sessions.write().await;
        let Some(state) = sessions.get_mut(token) else {
            return Vec::new();
        };
        let flashes = std::mem::take(&mut state.flashes);
        if state.user_key.is_none() {
            sessions.remove(token);
        }
        flashes
    }

    /// Destroy a session
    pub async fn destroy_session(&self, token: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token);
    }

    /// Get the number of live sessions (for debugging)
    pub async fn session_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
