//! Persistent console state
//!
//! The only state that survives between runs is the active section. It is
//! kept in an injected [`KeyValueStore`] so the same [`AppState`] logic
//! runs against a file on disk or an in-memory map in tests.

use crate::error::{Error, ErrorCode, Result};
use crate::sections::{self, Section};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, warn};

/// Key under which the active section is stored
pub const ACTIVE_SECTION_KEY: &str = "activeSection";

/// String key-value persistence
pub trait KeyValueStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value; deleting a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

fn poisoned() -> Error {
    Error::new(ErrorCode::Internal, "State lock poisoned")
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let guard = self.values.read().map_err(|_| poisoned())?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self.values.write().map_err(|_| poisoned())?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut guard = self.values.write().map_err(|_| poisoned())?;
        guard.remove(key);
        Ok(())
    }
}

/// JSON-file backed store
///
/// The whole map is read on every `get` and rewritten on every `set`; the
/// file holds a handful of keys.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store at `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            Error::new(
                ErrorCode::StateCorrupted,
                format!("State file {} is not a JSON object of strings", self.path.display()),
            )
            .with_source(e)
            .with_suggestion("Delete the state file to start fresh")
        })
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(values)?)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.read_all()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

/// Console state over an injected store
pub struct AppState<S: KeyValueStore> {
    store: S,
    active: &'static Section,
}

impl<S: KeyValueStore> AppState<S> {
    /// Restore state from `store`.
    ///
    /// A missing, unknown, or unreadable persisted section falls back to the
    /// default section; the store is left untouched until the next change.
    pub fn load(store: S) -> Self {
        let active = match store.get(ACTIVE_SECTION_KEY) {
            Ok(Some(id)) => sections::find(&id).unwrap_or_else(|| {
                debug!(section = %id, "Ignoring unknown persisted section");
                sections::default_section()
            }),
            Ok(None) => sections::default_section(),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted section");
                sections::default_section()
            }
        };

        Self { store, active }
    }

    /// Currently active section
    #[must_use]
    pub fn active_section(&self) -> &'static Section {
        self.active
    }

    /// Switch to `id` and persist it
    pub fn set_active_section(&mut self, id: &str) -> Result<&'static Section> {
        let section = sections::find(id).ok_or_else(|| Error::unknown_section(id))?;
        self.store.set(ACTIVE_SECTION_KEY, section.id)?;
        self.active = section;
        debug!(section = %section.id, "Active section changed");
        Ok(section)
    }

    /// Forget the persisted section and return to the default
    pub fn reset(&mut self) -> Result<()> {
        self.store.remove(ACTIVE_SECTION_KEY)?;
        self.active = sections::default_section();
        Ok(())
    }

    /// Borrow the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::DEFAULT_SECTION;

    #[test]
    fn test_default_when_empty() {
        let state = AppState::load(MemoryStore::new());
        assert_eq!(state.active_section().id, DEFAULT_SECTION);
    }

    #[test]
    fn test_persists_across_instances() {
        let store = MemoryStore::new();
        {
            let mut state = AppState::load(&store);
            state.set_active_section("users-manage").unwrap();
        }
        let state = AppState::load(&store);
        assert_eq!(state.active_section().id, "users-manage");
    }

    #[test]
    fn test_unknown_persisted_section_falls_back() {
        let store = MemoryStore::new();
        store.set(ACTIVE_SECTION_KEY, "reports-manage").unwrap();

        let state = AppState::load(&store);
        assert_eq!(state.active_section().id, DEFAULT_SECTION);
        // Left as-is until the user picks a section
        assert_eq!(
            store.get(ACTIVE_SECTION_KEY).unwrap().as_deref(),
            Some("reports-manage")
        );
    }

    #[test]
    fn test_set_unknown_section_rejected() {
        let store = MemoryStore::new();
        let mut state = AppState::load(&store);
        let err = state.set_active_section("nope").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownSection);
        assert_eq!(state.active_section().id, DEFAULT_SECTION);
        assert!(store.get(ACTIVE_SECTION_KEY).unwrap().is_none());
    }

    #[test]
    fn test_reset() {
        let store = MemoryStore::new();
        let mut state = AppState::load(&store);
        state.set_active_section("entities-create").unwrap();
        state.reset().unwrap();
        assert_eq!(state.active_section().id, DEFAULT_SECTION);
        assert!(store.get(ACTIVE_SECTION_KEY).unwrap().is_none());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let mut state = AppState::load(FileStore::new(&path));
        state.set_active_section("branch-hours-manage").unwrap();
        assert!(path.exists());

        let state = AppState::load(FileStore::new(&path));
        assert_eq!(state.active_section().id, "branch-hours-manage");
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("state.json"));
        store.set("theme", "dark").unwrap();
        store.set(ACTIVE_SECTION_KEY, "users-create").unwrap();
        store.remove(ACTIVE_SECTION_KEY).unwrap();

        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        assert!(store.get(ACTIVE_SECTION_KEY).unwrap().is_none());
    }

    #[test]
    fn test_corrupted_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get(ACTIVE_SECTION_KEY).unwrap_err().code, ErrorCode::StateCorrupted);

        let state = AppState::load(store);
        assert_eq!(state.active_section().id, DEFAULT_SECTION);
    }
}
