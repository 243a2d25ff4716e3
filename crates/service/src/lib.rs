//! Service layer for the product and cart resources.
//! - Persists every resource as a JSON array behind the `storage::CollectionStore` seam.
//! - Keeps request validation and the read-modify-write rules out of the HTTP layer.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod products;
pub mod carts;
