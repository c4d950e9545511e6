//! Auth session state with an explicit load/save/clear lifecycle.
//!
//! The session token lives in a single durable file (when a path is
//! configured) and is read at startup via [`SessionStore::load`]. Any HTTP
//! 401 anywhere clears the store; duplicate clears are idempotent, so
//! concurrent in-flight requests racing on expiry are harmless.

use std::fs;
use std::path::PathBuf;

use log::{debug, warn};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::transport::{ClientError, ClientResult};

/// Descriptor of the logged-in user, as echoed by the login endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, Default)]
struct Session {
    token: String,
    user: Option<SessionUser>,
    logged_in: bool,
}

/// Shared session context injected into the transport.
///
/// Replaces ambient storage access: all token reads and writes go through
/// this store.
pub struct SessionStore {
    inner: RwLock<Session>,
    /// Path the user originally requested when the session expired; the UI
    /// returns here after the next successful login.
    return_target: RwLock<Option<String>>,
    token_path: Option<PathBuf>,
}

impl SessionStore {
    /// Create a store backed by a durable token file.
    pub fn new(token_path: PathBuf) -> Self {
        SessionStore {
            inner: RwLock::new(Session::default()),
            return_target: RwLock::new(None),
            token_path: Some(token_path),
        }
    }

    /// Create a store with no durable backing (tests, throwaway sessions).
    pub fn in_memory() -> Self {
        SessionStore {
            inner: RwLock::new(Session::default()),
            return_target: RwLock::new(None),
            token_path: None,
        }
    }

    /// Load the persisted token, if any. A present token counts as a live
    /// session until the backend says otherwise.
    pub fn load(&self) -> ClientResult<()> {
        let Some(path) = &self.token_path else {
            return Ok(());
        };
        if !path.exists() {
            return Ok(());
        }
        let token = fs::read_to_string(path).map_err(|e| {
            ClientError::configuration(format!("failed to read token file: {}", e))
        })?;
        let token = token.trim().to_string();
        if token.is_empty() {
            return Ok(());
        }
        debug!("session token loaded from {}", path.display());
        let mut session = self.inner.write();
        session.token = token;
        session.logged_in = true;
        Ok(())
    }

    /// Install a fresh session after a successful login and persist the
    /// token.
    pub fn set_session(&self, token: impl Into<String>, user: Option<SessionUser>) {
        let token = token.into();
        self.persist(&token);
        let mut session = self.inner.write();
        session.token = token;
        session.user = user;
        session.logged_in = true;
        *self.return_target.write() = None;
    }

    /// Clear the session and remove the persisted token. Idempotent.
    pub fn clear(&self) {
        {
            let mut session = self.inner.write();
            session.token.clear();
            session.user = None;
            session.logged_in = false;
        }
        if let Some(path) = &self.token_path {
            if path.exists() {
                if let Err(e) = fs::remove_file(path) {
                    warn!("failed to remove token file {}: {}", path.display(), e);
                }
            }
        }
    }

    /// Expire the session after a 401, remembering the path the caller was
    /// trying to reach so the UI can return there after re-login.
    pub fn expire(&self, requested_path: &str) {
        warn!("session expired while requesting {}", requested_path);
        self.clear();
        *self.return_target.write() = Some(requested_path.to_string());
    }

    pub fn token(&self) -> Option<String> {
        let session = self.inner.read();
        if session.token.is_empty() {
            None
        } else {
            Some(session.token.clone())
        }
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.inner.read().user.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.read().logged_in
    }

    /// Consume the stored post-login return target, if any.
    pub fn take_return_target(&self) -> Option<String> {
        self.return_target.write().take()
    }

    fn persist(&self, token: &str) {
        let Some(path) = &self.token_path else {
            return;
        };
        if let Err(e) = fs::write(path, token) {
            warn!("failed to persist token to {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_store_is_logged_out() {
        let store = SessionStore::in_memory();
        assert!(!store.is_logged_in());
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_set_session_then_clear() {
        let store = SessionStore::in_memory();
        store.set_session(
            "tok-1",
            Some(SessionUser {
                id: 1,
                name: "admin".to_string(),
                role: "admin".to_string(),
            }),
        );
        assert!(store.is_logged_in());
        assert_eq!(store.token().as_deref(), Some("tok-1"));

        store.clear();
        assert!(!store.is_logged_in());
        assert_eq!(store.token(), None);
        // Clearing twice is a no-op.
        store.clear();
        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_expire_records_return_target() {
        let store = SessionStore::in_memory();
        store.set_session("tok-2", None);
        store.expire("/books?page=2");
        assert!(!store.is_logged_in());
        assert_eq!(store.take_return_target().as_deref(), Some("/books?page=2"));
        assert_eq!(store.take_return_target(), None);
    }

    #[test]
    fn test_token_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");

        let store = SessionStore::new(path.clone());
        store.set_session("persisted-token", None);
        assert!(path.exists());

        let reloaded = SessionStore::new(path.clone());
        reloaded.load().unwrap();
        assert!(reloaded.is_logged_in());
        assert_eq!(reloaded.token().as_deref(), Some("persisted-token"));

        reloaded.clear();
        assert!(!path.exists());
    }

    #[test]
    fn test_load_without_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("missing"));
        store.load().unwrap();
        assert!(!store.is_logged_in());
    }
}
