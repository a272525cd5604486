use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::foundation::error::{DriftError, DriftResult};

/// Key holding the live settings JSON.
pub const SETTINGS_KEY: &str = "settings";
/// Key holding the preset list JSON (newest first).
pub const PRESETS_KEY: &str = "presets";
/// Key holding the theme name.
pub const THEME_KEY: &str = "theme";

/// Durable local key/value storage.
///
/// Callers treat reads as best-effort: a missing key and a read error both mean "use defaults".
pub trait KeyValueStore {
    fn get(&self, key: &str) -> DriftResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> DriftResult<()>;
    fn remove(&mut self, key: &str) -> DriftResult<()>;
}

/// In-process store; nothing survives the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> DriftResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> DriftResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> DriftResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory. Writes go through a temp file and a rename
/// so a crash mid-write leaves either the old or the new value.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> DriftResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        if !valid {
            return Err(DriftError::storage(format!("invalid storage key \"{key}\"")));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> DriftResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(DriftError::storage(format!(
                "read '{}': {err}",
                path.display()
            ))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> DriftResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.root).map_err(|e| {
            DriftError::storage(format!("create state dir '{}': {e}", self.root.display()))
        })?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)
            .map_err(|e| DriftError::storage(format!("write '{}': {e}", tmp.display())))?;
        std::fs::rename(&tmp, &path)
            .map_err(|e| DriftError::storage(format!("replace '{}': {e}", path.display())))
    }

    fn remove(&mut self, key: &str) -> DriftResult<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(DriftError::storage(format!(
                "remove '{}': {err}",
                path.display()
            ))),
        }
    }
}

/// Read a key, treating any storage failure as absence.
pub(crate) fn read_best_effort(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(v) => v,
        Err(err) => {
            tracing::warn!(key, %err, "storage read failed, using defaults");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storage/kv.rs"]
mod tests;
