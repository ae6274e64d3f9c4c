use crate::document::SessionDoc;
use crate::layout::LayoutRegistry;
use crate::session::SessionState;
use crate::KeynotesError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// The fixed key the whole session snapshot is stored under.
pub const STORAGE_KEY: &str = "keynotes-session";

/// Durable key-value storage. The core only ever needs these two calls;
/// write failures are reported to the caller, who logs and moves on.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> std::io::Result<()>;
}

/// One file per key under a directory, created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)
    }
}

/// In-memory storage, mainly for tests. `fail_writes` simulates a full or
/// read-only backing store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub entries: BTreeMap<String, String>,
    pub fail_writes: bool,
}

impl Storage for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> std::io::Result<()> {
        if self.fail_writes {
            return Err(std::io::Error::other("writes disabled"));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Owns the load/save contract around a storage backend.
///
/// `load` never fails: an absent or corrupt snapshot degrades to a fresh
/// session with a warning. The first `save` after a `load` is a one-shot
/// no-op, so the autosave fired by the initial render cannot rewrite a
/// freshly loaded (possibly auto-repaired) snapshot before any user action.
pub struct Persister<S: Storage> {
    storage: S,
    suppress_next_save: bool,
}

impl<S: Storage> Persister<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            suppress_next_save: false,
        }
    }

    pub fn load(&mut self, registry: &LayoutRegistry, default_layout_name: &str) -> SessionState {
        self.suppress_next_save = true;
        let Some(raw) = self.storage.get(STORAGE_KEY) else {
            return SessionState::fresh(registry, default_layout_name);
        };
        let parsed = serde_json::from_str::<SessionDoc>(&raw)
            .map_err(KeynotesError::from)
            .and_then(|doc| doc.into_state(registry, default_layout_name));
        match parsed {
            Ok(state) => state,
            Err(e) => {
                warn!("discarding unreadable session snapshot: {}", e);
                SessionState::fresh(registry, default_layout_name)
            }
        }
    }

    pub fn save(&mut self, state: &SessionState) {
        if self.suppress_next_save {
            self.suppress_next_save = false;
            return;
        }
        let doc = SessionDoc::from_state(state);
        match serde_json::to_string(&doc) {
            Ok(raw) => {
                if let Err(e) = self.storage.set(STORAGE_KEY, &raw) {
                    warn!("failed to persist session snapshot: {}", e);
                }
            }
            Err(e) => warn!("failed to serialize session snapshot: {}", e),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
