use std::collections::BTreeMap;
use std::collections::HashMap as StdHashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encode: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Synchronous string key-value persistence. Writes are visible to the next read
/// from any handle on the same scope.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process store; clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    map: Arc<parking_lot::RwLock<StdHashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self { Self::default() }
    pub fn is_empty(&self) -> bool { self.map.read().is_empty() }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> { self.map.read().get(key).cloned() }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.map.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.map.write().remove(key);
        Ok(())
    }
}

/// Durable store: one JSON object document per directory, re-read on every access
/// so separate handles (and separate processes) observe each other's writes.
#[derive(Clone)]
pub struct FileStorage {
    dir: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_lock: Arc<parking_lot::Mutex<()>>,
}

impl FileStorage {
    pub const FILE_NAME: &'static str = "storage.json";

    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, write_lock: Arc::new(parking_lot::Mutex::new(())) })
    }

    pub fn path(&self) -> PathBuf { self.dir.join(Self::FILE_NAME) }

    // Per-process so concurrent writers never share a temp file.
    fn tmp_path(&self) -> PathBuf {
        self.dir.join(format!("{}.{}.tmp", Self::FILE_NAME, std::process::id()))
    }

    fn load(&self) -> BTreeMap<String, String> {
        let bytes = match std::fs::read(self.path()) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!(target: "mira::session", path = %self.path().display(), error = %e, "storage document unreadable; treating as empty");
                return BTreeMap::new();
            }
        };
        match serde_json::from_slice::<BTreeMap<String, String>>(&bytes) {
            Ok(m) => m,
            Err(e) => {
                warn!(target: "mira::session", path = %self.path().display(), error = %e, "storage document unreadable; treating as empty");
                BTreeMap::new()
            }
        }
    }

    fn save(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(map)?;
        let tmp = self.tmp_path();
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(tmp, self.path())?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> { self.load().remove(key) }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _g = self.write_lock.lock();
        let mut map = self.load();
        map.insert(key.to_string(), value.to_string());
        self.save(&map)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _g = self.write_lock.lock();
        let mut map = self.load();
        if map.remove(key).is_none() { return Ok(()); }
        self.save(&map)
    }
}
