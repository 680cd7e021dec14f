//! # Session State
//!
//! The [`AuthContext`] the app runs with, backed by the session file from
//! config or, when no data directory exists, by memory for this run only.

use folio_data::{AuthContext, DataResult, FileSessionStore, FolioConfig, MemorySessionStore, SessionStore};
use tracing::{debug, warn};

/// Session storage selected at start-up.
#[derive(Debug, Clone)]
pub enum AppSessionStore {
    File(FileSessionStore),
    Memory(MemorySessionStore),
}

impl SessionStore for AppSessionStore {
    fn get(&self, key: &str) -> DataResult<Option<String>> {
        match self {
            AppSessionStore::File(store) => store.get(key),
            AppSessionStore::Memory(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> DataResult<()> {
        match self {
            AppSessionStore::File(store) => store.set(key, value),
            AppSessionStore::Memory(store) => store.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> DataResult<()> {
        match self {
            AppSessionStore::File(store) => store.remove(key),
            AppSessionStore::Memory(store) => store.remove(key),
        }
    }
}

/// The auth context every command shares.
pub type SessionState = AuthContext<AppSessionStore>;

/// Restores the signed-in user from the configured session file.
pub fn open_session(config: &FolioConfig) -> SessionState {
    let store = match config.session_path() {
        Some(path) => {
            debug!(?path, "Using session file");
            AppSessionStore::File(FileSessionStore::new(path))
        }
        None => {
            warn!("No data directory available; sign-ins last for this run only");
            AppSessionStore::Memory(MemorySessionStore::new())
        }
    };

    AuthContext::new(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_file_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FolioConfig::default();
        config.session.path = Some(dir.path().join("session.json"));

        let mut session = open_session(&config);
        assert!(!session.is_authenticated());
        session.sign_in("Ada").unwrap();

        let reopened = open_session(&config);
        assert_eq!(reopened.user().map(|u| u.name.as_str()), Some("Ada"));
        assert!(matches!(reopened.store(), AppSessionStore::File(_)));
    }
}
