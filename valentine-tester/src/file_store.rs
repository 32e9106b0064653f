//! A JSON file standing in for `localStorage`, so a saved state can be
//! inspected or replayed from the command line.
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use valentine_core::KeyValueStore;

#[derive(Debug, Error)]
pub enum FileStoreError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not a JSON object of strings: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Keys and values live in one flat JSON object. A missing file reads as an
/// empty store and is created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, FileStoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(FileStoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&text).map_err(|source| FileStoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), FileStoreError> {
        let json = serde_json::to_string_pretty(entries).map_err(|source| FileStoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(|source| FileStoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for FileStore {
    type Error = FileStoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "valentine-store-{label}-{}-{}.json",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let path = temp_file("missing");
        let store = FileStore::new(&path);
        assert_eq!(store.get("valentine_visited_days").unwrap(), None);
        store.remove("valentine_visited_days").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn values_persist_across_handles() {
        let path = temp_file("persist");
        FileStore::new(&path)
            .set("valentine_visited_days", "[\"rose\"]")
            .unwrap();
        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get("valentine_visited_days").unwrap().as_deref(),
            Some("[\"rose\"]")
        );
        reopened.remove("valentine_visited_days").unwrap();
        assert_eq!(reopened.get("valentine_visited_days").unwrap(), None);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = temp_file("malformed");
        fs::write(&path, "[1, 2, 3]").unwrap();
        let err = FileStore::new(&path).get("anything").unwrap_err();
        assert!(matches!(err, FileStoreError::Json { .. }));
        assert!(err.to_string().contains("not a JSON object"));
        let _ = fs::remove_file(path);
    }
}
