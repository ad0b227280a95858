/// In-process session store (the session gate)
///
/// Maps opaque random tokens to authenticated identities. Sessions are
/// created on login, resolved on every planner operation, and destroyed on
/// logout. They have no persistence: a process restart logs everyone out.
///
/// The store is an injectable dependency held in the application state, not
/// ambient global state. Cloning shares the same underlying map.
///
/// # Concurrency
///
/// The map sits behind a `std::sync::RwLock`; no lock is held across an
/// await point. Resolution takes a read lock, start/end take a write lock.
///
/// # Example
///
/// ```
/// use seasonplan_shared::auth::session::SessionStore;
/// use uuid::Uuid;
///
/// let sessions = SessionStore::new();
/// let user_id = Uuid::new_v4();
///
/// let token = sessions.start(user_id, "alice".to_string());
/// let identity = sessions.resolve(&token).unwrap();
/// assert_eq!(identity.user_id, user_id);
///
/// sessions.end(&token);
/// assert!(sessions.resolve(&token).is_none());
/// ```
use rand::RngCore;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Number of random bytes in a session token (hex-encoded to 64 chars)
const TOKEN_BYTES: usize = 32;

/// Identity bound to a session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    /// Authenticated user ID
    pub user_id: Uuid,

    /// Username cached at login time for display
    pub username: String,
}

/// Shared in-process session store
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionIdentity>>>,
}

impl SessionStore {
    /// Creates an empty session store
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new session for a user and returns the opaque token
    ///
    /// A user may hold any number of concurrent sessions (multiple devices
    /// coexist); starting a session never invalidates earlier ones.
    pub fn start(&self, user_id: Uuid, username: String) -> String {
        let token = generate_token();

        let mut sessions = self.sessions.write().expect("session lock poisoned");
        sessions.insert(token.clone(), SessionIdentity { user_id, username });

        tracing::debug!(user_id = %user_id, "Session started");
        token
    }

    /// Resolves a token to its bound identity
    ///
    /// Returns `None` for unknown, ended, or malformed tokens.
    pub fn resolve(&self, token: &str) -> Option<SessionIdentity> {
        let sessions = self.sessions.read().expect("session lock poisoned");
        sessions.get(token).cloned()
    }

    /// Ends a session
    ///
    /// Idempotent: ending an unknown or already-ended session is a no-op.
    pub fn end(&self, token: &str) {
        let mut sessions = self.sessions.write().expect("session lock poisoned");
        if let Some(identity) = sessions.remove(token) {
            tracing::debug!(user_id = %identity.user_id, "Session ended");
        }
    }

    /// Number of live sessions (all users)
    pub fn len(&self) -> usize {
        self.sessions.read().expect("session lock poisoned").len()
    }

    /// True when no sessions are live
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Generates a fresh random session token
///
/// 32 bytes from the OS RNG, hex-encoded. Tokens carry no structure; the
/// store map is the only way to interpret them.
fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_and_resolve() {
        let store = SessionStore::new();
        let user_id = Uuid::new_v4();

        let token = store.start(user_id, "alice".to_string());
        let identity = store.resolve(&token).expect("session should resolve");

        assert_eq!(identity.user_id, user_id);
        assert_eq!(identity.username, "alice");
    }

    #[test]
    fn test_resolve_unknown_token() {
        let store = SessionStore::new();
        assert!(store.resolve("no-such-token").is_none());
        assert!(store.resolve("").is_none());
    }

    #[test]
    fn test_end_is_idempotent() {
        let store = SessionStore::new();
        let token = store.start(Uuid::new_v4(), "alice".to_string());

        store.end(&token);
        assert!(store.resolve(&token).is_none());

        // Ending again (or ending garbage) is a no-op
        store.end(&token);
        store.end("never-existed");
        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_sessions_per_user() {
        let store = SessionStore::new();
        let user_id = Uuid::new_v4();

        let token_a = store.start(user_id, "alice".to_string());
        let token_b = store.start(user_id, "alice".to_string());

        assert_ne!(token_a, token_b);
        assert_eq!(store.len(), 2);

        // Ending one device leaves the other logged in
        store.end(&token_a);
        assert!(store.resolve(&token_a).is_none());
        assert!(store.resolve(&token_b).is_some());
    }

    #[test]
    fn test_token_shape() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_tokens_are_unique() {
        let store = SessionStore::new();
        let user_id = Uuid::new_v4();

        let mut tokens = std::collections::HashSet::new();
        for _ in 0..100 {
            assert!(tokens.insert(store.start(user_id, "alice".to_string())));
        }
    }

    #[test]
    fn test_clone_shares_state() {
        let store = SessionStore::new();
        let clone = store.clone();

        let token = store.start(Uuid::new_v4(), "alice".to_string());
        assert!(clone.resolve(&token).is_some());

        clone.end(&token);
        assert!(store.resolve(&token).is_none());
    }
}
