use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::foundation::error::{PosterError, PosterResult};

/// A key-value store holding persisted design slots.
///
/// Writers win in arrival order; there is no versioning.
pub trait SlotStorage {
    /// Read the value stored under `key`. An absent key is `Ok(None)`, not an error.
    fn get(&self, key: &str) -> PosterResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> PosterResult<()>;
}

impl<T: SlotStorage + ?Sized> SlotStorage for &mut T {
    fn get(&self, key: &str) -> PosterResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> PosterResult<()> {
        (**self).set(key, value)
    }
}

/// In-memory slots.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl SlotStorage for MemoryStorage {
    fn get(&self, key: &str) -> PosterResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PosterResult<()> {
        self.slots.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Slots stored as `<dir>/<key>.json` files.
///
/// Writes land in a sibling temp file first and are renamed into place, so readers never see a
/// half-written record.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, key: &str) -> PosterResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(PosterError::storage(format!(
                "slot key \"{key}\" must be non-empty [A-Za-z0-9_-]"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SlotStorage for FileStorage {
    fn get(&self, key: &str) -> PosterResult<Option<String>> {
        let path = self.slot_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PosterError::storage(format!(
                "read '{}': {e}",
                path.display()
            ))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> PosterResult<()> {
        let path = self.slot_path(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            PosterError::storage(format!("create store dir '{}': {e}", self.dir.display()))
        })?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)
            .map_err(|e| PosterError::storage(format!("write '{}': {e}", tmp.display())))?;
        std::fs::rename(&tmp, &path).map_err(|e| {
            PosterError::storage(format!("replace '{}': {e}", path.display()))
        })?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/design/storage.rs"]
mod tests;
