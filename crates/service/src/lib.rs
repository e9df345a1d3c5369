//! Storage layer for HBNB entities.
//! - `storage` holds the backend-neutral contract and its file and database implementations.
//! - `selector` picks one backend from configuration and hands out the shared handle.
//! - Errors surface as `ServiceError`, wrapping model errors from the `models` crate.

pub mod errors;
pub mod storage;
pub mod selector;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use selector::Storage;
pub use storage::{ObjectMap, StorageEngine};
