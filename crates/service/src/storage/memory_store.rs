use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::storage::CollectionStore;

/// In-memory collection store. Holds the serialized bytes exactly as a file
/// would, so decoding behaves the same as with [`super::JsonFileStore`].
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a collection's raw contents, valid JSON or not.
    pub async fn seed(&self, collection: &str, raw: &str) {
        let mut map = self.inner.write().await;
        map.insert(collection.to_string(), raw.as_bytes().to_vec());
    }

    /// Raw contents of a collection as text.
    pub async fn raw(&self, collection: &str) -> Option<String> {
        let map = self.inner.read().await;
        map.get(collection).map(|b| String::from_utf8_lossy(b).into_owned())
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn load(&self, collection: &str) -> Result<Option<Vec<u8>>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.get(collection).cloned())
    }

    async fn save(&self, collection: &str, data: Vec<u8>) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        map.insert(collection.to_string(), data);
        Ok(())
    }
}
