use std::{marker::PhantomData, sync::Arc};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::warn;

use crate::errors::ServiceError;
use crate::storage::{CollectionStore, Stored};

/// Typed view over one named collection of a [`CollectionStore`].
///
/// Reads fail open: a missing or unreadable collection, or one that is not
/// a JSON array, is treated as empty. Inside a valid array, elements that do
/// not decode into `T` are kept as [`Stored::Raw`]. Writes replace the whole
/// array with pretty-printed JSON.
/// Mutations go through [`Collection::update`], which serializes the
/// read-modify-write cycle for this collection within the process.
pub struct Collection<T> {
    store: Arc<dyn CollectionStore>,
    name: &'static str,
    write_lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned + Send,
{
    pub fn new(store: Arc<dyn CollectionStore>, name: &'static str) -> Self {
        Self { store, name, write_lock: Mutex::new(()), _marker: PhantomData }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Load all records. Never fails.
    pub async fn read(&self) -> Vec<Stored<T>> {
        let bytes = match self.store.load(self.name).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(collection = self.name, error = %e, "collection unreadable; treating as empty");
                return Vec::new();
            }
        };
        let values: Vec<Value> = match serde_json::from_slice(&bytes) {
            Ok(values) => values,
            Err(e) => {
                warn!(collection = self.name, error = %e, "collection is not a valid JSON array; treating as empty");
                return Vec::new();
            }
        };
        let records: Vec<Stored<T>> = values
            .into_iter()
            .map(|value| match T::deserialize(&value) {
                Ok(record) => Stored::Typed(record),
                Err(_) => Stored::Raw(value),
            })
            .collect();
        let raw = records.iter().filter(|r| r.is_raw()).count();
        if raw > 0 {
            warn!(collection = self.name, raw, "records kept as raw JSON: they do not match the record shape");
        }
        records
    }

    /// Overwrite the collection with `records`.
    pub async fn write(&self, records: &[Stored<T>]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(records).map_err(|e| ServiceError::Storage(e.to_string()))?;
        self.store.save(self.name, data).await
    }

    /// Read, apply `f`, and persist if `f` succeeds. An error from `f` leaves
    /// the stored collection untouched.
    pub async fn update<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<Stored<T>>) -> Result<R, ServiceError> + Send,
        R: Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read().await;
        let out = f(&mut records)?;
        self.write(&records).await?;
        Ok(out)
    }
}
