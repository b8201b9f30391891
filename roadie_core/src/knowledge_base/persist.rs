//! Durable JSON storage with whole-file atomic rewrites.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::StoreError;

/// A JSON document on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document. A missing or blank file yields `T::default()`.
    pub fn load<T: Default + DeserializeOwned>(&self) -> Result<T, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "store file not found, starting empty");
                return Ok(T::default());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(T::default());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Rewrite the whole document, pretty-printed.
    ///
    /// Writes to a sibling temp file first and renames it into place, so a
    /// crash never leaves a truncated file behind.
    pub fn save<T: Serialize>(&self, value: &T) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(value).map_err(|source| StoreError::Encode {
            path: self.path.clone(),
            source,
        })?;

        let write_err = |source: std::io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let temp_path = self.temp_path();
        std::fs::write(&temp_path, data).map_err(write_err)?;
        if let Err(source) = std::fs::rename(&temp_path, &self.path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(write_err(source));
        }

        debug!(path = %self.path.display(), "store flushed");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// An in-memory value that is flushed in full after every mutation.
#[derive(Debug)]
pub struct PersistentStore<T> {
    data: T,
    file: JsonFile,
}

impl<T> PersistentStore<T>
where
    T: Default + Serialize + DeserializeOwned,
{
    /// Load the value from `path`, or start empty if the file is absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let file = JsonFile::new(path);
        let data = file.load()?;
        Ok(Self { data, file })
    }

    /// Wrap an existing value without touching disk.
    pub fn with_data(path: impl Into<PathBuf>, data: T) -> Self {
        Self {
            data,
            file: JsonFile::new(path),
        }
    }

    /// Read access to the cached value.
    pub fn get(&self) -> &T {
        &self.data
    }

    /// Mutate the value, then rewrite the file.
    ///
    /// The in-memory change is kept even when the flush fails.
    pub fn update<R>(&mut self, mutate: impl FnOnce(&mut T) -> R) -> Result<R, StoreError> {
        let result = mutate(&mut self.data);
        self.flush()?;
        Ok(result)
    }

    pub fn flush(&self) -> Result<(), StoreError> {
        self.file.save(&self.data)
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    type Doc = IndexMap<String, String>;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store: PersistentStore<Doc> =
            PersistentStore::open(dir.path().join("none.json")).unwrap();
        assert!(store.get().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_blank_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.json");
        std::fs::write(&path, "  \n").unwrap();

        let doc: Doc = JsonFile::new(&path).load().unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result: Result<Doc, _> = JsonFile::new(&path).load();
        assert!(matches!(result, Err(StoreError::Parse { .. })));
    }

    #[test]
    fn test_update_flushes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("doc.json");
        let mut store: PersistentStore<Doc> = PersistentStore::open(&path).unwrap();

        store
            .update(|doc| doc.insert("b".to_string(), "two".to_string()))
            .unwrap();
        store
            .update(|doc| doc.insert("a".to_string(), "one".to_string()))
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"b\": \"two\",\n  \"a\": \"one\"\n}");
        assert!(!dir.path().join("nested").join("doc.json.tmp").exists());

        let reopened: PersistentStore<Doc> = PersistentStore::open(&path).unwrap();
        let keys: Vec<_> = reopened.get().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_failed_flush_keeps_memory() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the rename fail.
        let path = dir.path().join("taken");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("occupant"), "x").unwrap();

        let mut store: PersistentStore<Doc> = PersistentStore::with_data(&path, Doc::new());
        let result = store.update(|doc| doc.insert("k".to_string(), "v".to_string()));

        assert!(matches!(result, Err(StoreError::Write { .. })));
        assert_eq!(store.get().get("k").map(String::as_str), Some("v"));
        assert!(!dir.path().join("taken.tmp").exists());
    }
}
