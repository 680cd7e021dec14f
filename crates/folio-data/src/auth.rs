//! # Auth Context
//!
//! The signed-in user, restored from and written back to local storage.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          AuthContext                                    │
//! │                                                                         │
//! │   new(store) ── read "user" ──┬── valid JSON ──► Signed in (user)      │
//! │                               ├── absent ──────► Signed out            │
//! │                               └── invalid ─────► Signed out (warn)     │
//! │                                                                         │
//! │   sign_in(name) ──► store["user"] = {"name": ..}                       │
//! │   sign_out()    ──► remove store["user"]                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is verified. The context only decides whether mutating
//! controls are shown.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use folio_core::session::{AuthSnapshot, User};
use folio_core::SESSION_KEY;
use tracing::{debug, info, warn};

use crate::error::{DataError, DataResult};

// =============================================================================
// Session Storage
// =============================================================================

/// String key/value storage, shaped like browser local storage.
pub trait SessionStore {
    fn get(&self, key: &str) -> DataResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> DataResult<()>;
    fn remove(&mut self, key: &str) -> DataResult<()>;
}

/// In-process storage, for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: BTreeMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> DataResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> DataResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> DataResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A JSON object of key → string in a file.
///
/// The file is re-read on every access so separate `folio-admin` runs see
/// each other's sign-ins.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSessionStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_contents(&self) -> DataResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| DataError::Session(format!("{}: {}", self.path.display(), e)))?;
        Ok(Some(contents).filter(|c| !c.trim().is_empty()))
    }

    fn read_all(&self) -> DataResult<BTreeMap<String, String>> {
        match self.read_contents()? {
            Some(contents) => serde_json::from_str(&contents)
                .map_err(|e| DataError::Session(format!("{}: {}", self.path.display(), e))),
            None => Ok(BTreeMap::new()),
        }
    }

    /// Entries to update before a write, and whether the file must be
    /// rewritten regardless. Malformed JSON is dropped.
    fn read_for_write(&self) -> DataResult<(BTreeMap<String, String>, bool)> {
        let Some(contents) = self.read_contents()? else {
            return Ok((BTreeMap::new(), false));
        };

        match serde_json::from_str(&contents) {
            Ok(entries) => Ok((entries, false)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Overwriting corrupt session file");
                Ok((BTreeMap::new(), true))
            }
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> DataResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DataError::Session(format!("{}: {}", parent.display(), e)))?;
        }

        let contents = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, contents)
            .map_err(|e| DataError::Session(format!("{}: {}", self.path.display(), e)))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> DataResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> DataResult<()> {
        let (mut entries, _) = self.read_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> DataResult<()> {
        let (mut entries, corrupt) = self.read_for_write()?;
        if entries.remove(key).is_some() || corrupt {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

// =============================================================================
// Auth Context
// =============================================================================

/// Current user plus the storage it is mirrored to.
#[derive(Debug)]
pub struct AuthContext<S: SessionStore> {
    store: S,
    user: Option<User>,
}

impl<S: SessionStore> AuthContext<S> {
    /// Restores the user saved under the `user` key, if any.
    ///
    /// Unreadable storage or malformed JSON starts signed out.
    pub fn new(store: S) -> Self {
        let user = match store.get(SESSION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    debug!(user = %user.name, "Restored signed-in user");
                    Some(user)
                }
                Err(e) => {
                    warn!(error = %e, "Ignoring invalid stored user");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Could not read session storage");
                None
            }
        };

        AuthContext { store, user }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot::from_user(self.user.clone())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Signs in under `name` ("User" when blank).
    pub fn sign_in(&mut self, name: &str) -> DataResult<&User> {
        self.sign_in_at(name, Utc::now())
    }

    /// [`AuthContext::sign_in`] with an explicit timestamp.
    pub fn sign_in_at(&mut self, name: &str, at: DateTime<Utc>) -> DataResult<&User> {
        let user = User::sign_in(name, at);
        info!(user = %user.name, "Signed in");
        self.set_user(Some(user))?;
        self.user
            .as_ref()
            .ok_or_else(|| DataError::Session("user missing after sign-in".into()))
    }

    pub fn sign_out(&mut self) -> DataResult<()> {
        if let Some(user) = &self.user {
            info!(user = %user.name, "Signed out");
        }
        self.set_user(None)
    }

    /// Updates the user and mirrors it to storage.
    fn set_user(&mut self, user: Option<User>) -> DataResult<()> {
        match &user {
            Some(user) => {
                let raw = serde_json::to_string(user)?;
                self.store.set(SESSION_KEY, &raw)?;
            }
            None => self.store.remove(SESSION_KEY)?,
        }
        self.user = user;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_starts_signed_out() {
        let auth = AuthContext::new(MemorySessionStore::new());
        assert!(!auth.is_authenticated());
        assert_eq!(auth.snapshot(), AuthSnapshot::signed_out());
    }

    #[test]
    fn test_restores_stored_user() {
        let store = MemorySessionStore::with_entry("user", r#"{"name":"Ada"}"#);
        let auth = AuthContext::new(store);
        assert!(auth.is_authenticated());
        assert_eq!(auth.user().map(|u| u.name.as_str()), Some("Ada"));
    }

    #[test]
    fn test_invalid_stored_user_is_ignored() {
        let store = MemorySessionStore::with_entry("user", "{not json");
        let auth = AuthContext::new(store);
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_sign_in_and_out_persist() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        let mut auth = AuthContext::new(MemorySessionStore::new());

        let user = auth.sign_in_at("  Grace ", at).unwrap();
        assert_eq!(user.name, "Grace");

        let raw = auth.store().get("user").unwrap().unwrap();
        let stored: User = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.name, "Grace");
        assert_eq!(stored.signed_in_at, Some(at));

        auth.sign_out().unwrap();
        assert!(!auth.is_authenticated());
        assert_eq!(auth.store().get("user").unwrap(), None);
    }

    #[test]
    fn test_blank_name_signs_in_as_user() {
        let mut auth = AuthContext::new(MemorySessionStore::new());
        assert_eq!(auth.sign_in("").unwrap().name, "User");
        assert!(auth.snapshot().is_authenticated);
    }

    #[test]
    fn test_file_store_survives_new_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("session.json");

        let mut auth = AuthContext::new(FileSessionStore::new(&path));
        auth.sign_in("Octavia").unwrap();
        assert!(path.exists());

        let restored = AuthContext::new(FileSessionStore::new(&path));
        assert_eq!(restored.user().map(|u| u.name.as_str()), Some("Octavia"));

        let mut restored = restored;
        restored.sign_out().unwrap();
        let after = AuthContext::new(FileSessionStore::new(&path));
        assert!(!after.is_authenticated());
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let mut store = FileSessionStore::new(&path);

        store.set("theme", "dark").unwrap();
        store.set("user", r#"{"name":"Ada"}"#).unwrap();
        store.remove("user").unwrap();

        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(store.get("user").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_starts_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "[1, 2").unwrap();

        let auth = AuthContext::new(FileSessionStore::new(&path));
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_corrupt_file_is_rewritten_on_sign_in() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "[1, 2").unwrap();

        let mut auth = AuthContext::new(FileSessionStore::new(&path));
        assert_eq!(auth.sign_in("Ada").unwrap().name, "Ada");

        let restored = AuthContext::new(FileSessionStore::new(&path));
        assert_eq!(restored.user().map(|u| u.name.as_str()), Some("Ada"));
    }

    #[test]
    fn test_corrupt_file_is_cleared_on_sign_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{\"user\": 7").unwrap();

        let mut auth = AuthContext::new(FileSessionStore::new(&path));
        auth.sign_out().unwrap();

        let store = FileSessionStore::new(&path);
        assert_eq!(store.get("user").unwrap(), None);
    }
}
