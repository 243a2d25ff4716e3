use std::{collections::HashMap, io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::errors::ServiceError;
use crate::storage::CollectionStore;

/// File-backed collection store: one JSON file per collection.
///
/// Collections without an explicit file mapping live at
/// `<data_dir>/<collection>.json`. Writes overwrite the file in place and
/// are not atomic.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    data_dir: PathBuf,
    files: HashMap<String, PathBuf>,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self { data_dir: data_dir.into(), files: HashMap::new() }
    }

    /// Map a collection name to a file name relative to the data directory.
    pub fn with_file<P: Into<PathBuf>>(mut self, collection: &str, file: P) -> Self {
        self.files.insert(collection.to_string(), file.into());
        self
    }

    pub fn path_for(&self, collection: &str) -> PathBuf {
        match self.files.get(collection) {
            Some(file) => self.data_dir.join(file),
            None => self.data_dir.join(format!("{collection}.json")),
        }
    }
}

#[async_trait]
impl CollectionStore for JsonFileStore {
    async fn load(&self, collection: &str) -> Result<Option<Vec<u8>>, ServiceError> {
        match fs::read(self.path_for(collection)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ServiceError::Storage(e.to_string())),
        }
    }

    async fn save(&self, collection: &str, data: Vec<u8>) -> Result<(), ServiceError> {
        let path = self.path_for(collection);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
        }
        fs::write(&path, data).await.map_err(|e| ServiceError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use uuid::Uuid;

    use crate::storage::{Collection, Stored};

    #[tokio::test]
    async fn json_file_store_persists_across_instances() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("json_file_store_{}", Uuid::new_v4()));
        let store = JsonFileStore::new(&dir).with_file("words", "palabras.json");
        assert_eq!(store.path_for("words"), dir.join("palabras.json"));
        assert_eq!(store.path_for("other"), dir.join("other.json"));

        // nothing on disk yet
        assert!(store.load("words").await?.is_none());

        let words: Collection<String> = Collection::new(Arc::new(store.clone()), "words");
        words.write(&[Stored::Typed("a".to_string()), Stored::Typed("b".to_string())]).await?;

        let on_disk = tokio::fs::read_to_string(dir.join("palabras.json")).await?;
        assert!(on_disk.contains("\n  \"a\""));

        let reloaded: Collection<String> = Collection::new(Arc::new(JsonFileStore::new(&dir).with_file("words", "palabras.json")), "words");
        assert_eq!(reloaded.read().await, vec![Stored::Typed("a".to_string()), Stored::Typed("b".to_string())]);

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_reads_as_empty() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("json_file_store_{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join("words.json"), b"[\"trunc").await?;

        let words: Collection<String> = Collection::new(Arc::new(JsonFileStore::new(&dir)), "words");
        assert!(words.read().await.is_empty());

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
