use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::domain::errors::DomainError;
use crate::domain::ports::KeyValueStore;

impl From<io::Error> for DomainError {
    fn from(e: io::Error) -> Self {
        DomainError::Storage(e.to_string())
    }
}

/// One file per key under a data directory. Writes go through a temporary
/// file and a rename, so a value is either fully old or fully new.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, DomainError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(DomainError::Storage(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DomainError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        let tmp = path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DomainError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_set_then_overwrite() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut storage = FileStorage::new(dir.path().join("data"));

        assert_eq!(storage.get("cart").unwrap(), None);

        storage.set("cart", "[1,2]").unwrap();
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("[1,2]"));

        storage.set("cart", "[]").unwrap();
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("[]"));
        assert!(!dir.path().join("data").join("cart.json.tmp").exists());
    }

    #[test]
    fn file_storage_values_survive_a_new_instance() {
        let dir = tempfile::tempdir().expect("tempdir");
        FileStorage::new(dir.path()).set("swiftcart_cart", "[]").unwrap();

        let reopened = FileStorage::new(dir.path());
        assert_eq!(reopened.get("swiftcart_cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn file_storage_rejects_path_like_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut storage = FileStorage::new(dir.path());

        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(matches!(storage.set(key, "x"), Err(DomainError::Storage(_))), "{key}");
        }
    }

    #[test]
    fn memory_storage_overwrites_seeded_entry() {
        let mut storage = MemoryStorage::with_entry("k", "v");
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.set("k", "w").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("w"));
        assert_eq!(storage.get("other").unwrap(), None);
    }
}
