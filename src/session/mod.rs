//! Durable snapshot of the signed-in user.
//! The store is an explicit context object handed to guards and page code; it holds
//! at most one user under a single fixed key.

mod kv;

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::identity::User;
use crate::tprintln;

pub use kv::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};

/// The only key this crate persists.
pub const SESSION_KEY: &str = "mira_user";

#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self { Self { storage } }

    pub fn in_memory() -> Self { Self::new(Arc::new(MemoryStorage::new())) }

    pub fn open_dir(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        Ok(Self::new(Arc::new(FileStorage::open(dir)?)))
    }

    /// Persist `user`, replacing any previous snapshot.
    pub fn set_user(&self, user: &User) -> Result<(), StorageError> {
        let raw = serde_json::to_string(user)?;
        self.storage.set(SESSION_KEY, &raw)?;
        debug!(target: "mira::session", user_id = %user.id, role = %user.role, "session stored");
        Ok(())
    }

    /// Current snapshot. Corrupted data (bad JSON, unknown role) reads as absent.
    pub fn get_user(&self) -> Option<User> {
        let raw = self.storage.get(SESSION_KEY)?;
        match serde_json::from_str::<User>(&raw) {
            Ok(u) => Some(u),
            Err(e) => {
                warn!(target: "mira::session", error = %e, "persisted session is corrupted; treating as logged out");
                None
            }
        }
    }

    pub fn clear_user(&self) -> Result<(), StorageError> {
        self.storage.remove(SESSION_KEY)?;
        tprintln!("session.clear");
        Ok(())
    }

    pub fn is_logged_in(&self) -> bool { self.get_user().is_some() }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").field("key", &SESSION_KEY).finish()
    }
}
