use reelquest_execution::{KeyValueStore, StoreError};
use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::debug;

/// A [KeyValueStore] persisted as a JSON object on disk.
///
/// The whole file is rewritten on every `set`, through a sibling temporary
/// file that is renamed into place.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), entries = entries.len(), "store opened");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let contents = serde_json::to_vec_pretty(&self.entries)?;
        let temp = self.path.with_extension("tmp");
        fs::write(&temp, contents).await?;
        fs::rename(&temp, &self.path).await?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        self.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "reelquest-store-{}-{name}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = scratch("missing");
        let store = FileStore::open(dir.join("save.json")).await.unwrap();
        assert_eq!(store.get("fantasy_slot_gold").await.unwrap(), None);
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_reopen_sees_writes() {
        let dir = scratch("reopen");
        let path = dir.join("nested").join("save.json");

        let mut store = FileStore::open(&path).await.unwrap();
        store
            .set("fantasy_slot_gold", "1975".to_string())
            .await
            .unwrap();
        store.set("fantasy_slot_level", "2".to_string()).await.unwrap();
        assert!(!path.with_extension("tmp").exists());

        let reopened = FileStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get("fantasy_slot_gold").await.unwrap().as_deref(),
            Some("1975")
        );
        assert_eq!(
            reopened.get("fantasy_slot_level").await.unwrap().as_deref(),
            Some("2")
        );
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = scratch("corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("save.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            FileStore::open(&path).await,
            Err(StoreError::Encoding(_))
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
