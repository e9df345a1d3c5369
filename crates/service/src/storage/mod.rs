//! Storage abstractions for the service layer
//!
//! `StorageEngine` is the contract both backends implement: a file-backed
//! identity map persisted as one JSON document, and a database-backed store
//! that stages writes in a transaction. Callers stay backend-agnostic because
//! both key their results with `models::storage_key`.
//!
//! Every mutation (`add`, `delete`) is staged until `save`, on both backends.

use std::collections::HashMap;

use async_trait::async_trait;
use models::{Entity, EntityKind};

use crate::errors::ServiceError;

pub mod db_storage;
pub mod file_storage;
mod tables;

pub use db_storage::DbStorage;
pub use file_storage::FileStorage;

/// Entities keyed by `"{kind}.{id}"`.
pub type ObjectMap = HashMap<String, Entity>;

#[async_trait]
pub trait StorageEngine: Send + Sync {
    /// Every registered entity, or only those of `kind`.
    async fn all(&self, kind: Option<EntityKind>) -> Result<ObjectMap, ServiceError>;

    /// Register `entity` for the next `save`. Re-adding an entity overwrites it.
    async fn add(&self, entity: &Entity) -> Result<(), ServiceError>;

    /// Make every staged change durable.
    async fn save(&self) -> Result<(), ServiceError>;

    /// Stage removal of `entity`. `None` or an unknown entity is a no-op.
    async fn delete(&self, entity: Option<&Entity>) -> Result<(), ServiceError>;

    /// Populate (file) or attach (database) the store state.
    async fn reload(&self) -> Result<(), ServiceError>;
}
