use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;

use crate::store::schema::StorageData;

const STORAGE_FILE: &str = "storage.json";

/// Small persistent key-value map, written through on every change. Without
/// a base directory it only lives in memory.
pub struct JsonStore {
    base_dir: Option<PathBuf>,
    data: StorageData,
}

impl JsonStore {
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        let data = load(&base_dir.join(STORAGE_FILE));
        Ok(Self {
            base_dir: Some(base_dir),
            data,
        })
    }

    pub fn in_memory() -> Self {
        Self {
            base_dir: None,
            data: StorageData::default(),
        }
    }

    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kbmirror")
    }

    #[cfg(test)]
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.entries.get(key).map(String::as_str)
    }

    /// The in-memory value changes even if writing it out fails.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.data.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    #[cfg(test)]
    pub fn remove(&mut self, key: &str) -> Result<()> {
        if self.data.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        self.data.updated_at = Some(Utc::now());
        let Some(base_dir) = &self.base_dir else {
            return Ok(());
        };
        let path = base_dir.join(STORAGE_FILE);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(&self.data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

/// Missing, unreadable, corrupt or stale files all load as empty storage.
fn load(path: &Path) -> StorageData {
    let data: StorageData = match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => StorageData::default(),
    };
    if data.needs_reset() {
        log::warn!(
            "discarding storage with schema version {}",
            data.schema_version
        );
        return StorageData::default();
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_set_survives_reopen() {
        let (dir, mut store) = make_test_store();
        assert_eq!(store.get("theme"), None);
        store.set("theme", "light").unwrap();
        assert_eq!(store.get("theme"), Some("light"));

        let reopened = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(reopened.get("theme"), Some("light"));
        assert!(!dir.path().join("storage.tmp").exists());
    }

    #[test]
    fn test_remove() {
        let (dir, mut store) = make_test_store();
        store.set("theme", "dark").unwrap();
        store.remove("theme").unwrap();
        store.remove("missing").unwrap();

        let reopened = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(reopened.get("theme"), None);
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("storage.json"), "{ not json").unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.get("theme"), None);
    }

    #[test]
    fn test_stale_schema_loads_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("storage.json"),
            r#"{"schema_version": 99, "entries": {"theme": "light"}}"#,
        )
        .unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.get("theme"), None);
    }

    #[test]
    fn test_in_memory_store() {
        let mut store = JsonStore::in_memory();
        store.set("theme", "light").unwrap();
        assert_eq!(store.get("theme"), Some("light"));
        assert!(store.base_dir().is_none());
    }
}
