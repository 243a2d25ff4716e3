//! Storage abstractions for the service layer
//!
//! Every resource is persisted as one JSON array per named collection.
//! Handlers never touch the medium directly: they go through a
//! [`CollectionStore`] injected at startup, either file-backed
//! ([`JsonFileStore`]) or in-memory ([`MemoryStore`]).

pub mod collection;
pub mod json_file_store;
pub mod memory_store;
pub mod stored;

use async_trait::async_trait;

use crate::errors::ServiceError;

pub use collection::Collection;
pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use stored::{Record, Stored};

/// Raw persistence capability for named collections.
///
/// `load` returns `Ok(None)` when the collection has never been written.
/// Decoding is left to [`Collection`], which owns the fail-open policy.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    async fn load(&self, collection: &str) -> Result<Option<Vec<u8>>, ServiceError>;
    async fn save(&self, collection: &str, data: Vec<u8>) -> Result<(), ServiceError>;
}
