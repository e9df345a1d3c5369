use std::{
    collections::{BTreeMap, HashMap},
    io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use models::{Entity, EntityKind};
use serde_json::{Map, Value};
use tokio::{fs, sync::RwLock};
use tracing::{debug, info, warn};

use crate::errors::ServiceError;
use crate::storage::{ObjectMap, StorageEngine};

/// JSON file-backed store.
///
/// Keeps every registered entity in an identity map keyed by
/// `"{kind}.{id}"` and writes the whole map to one JSON document on `save`.
/// The map is `None` until the first successful `reload`.
pub struct FileStorage {
    objects: RwLock<Option<ObjectMap>>,
    file_path: PathBuf,
}

impl FileStorage {
    /// Create an unloaded store over `path`. Nothing is read until `reload`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { objects: RwLock::new(None), file_path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub async fn is_loaded(&self) -> bool {
        self.objects.read().await.is_some()
    }

    async fn read_document(&self) -> Result<ObjectMap, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.file_path.display(), "no storage document yet; starting empty");
                return Ok(HashMap::new());
            }
            Err(e) => return Err(e.into()),
        };

        let document: Map<String, Value> =
            serde_json::from_slice(&bytes).map_err(|e| ServiceError::corrupt(&self.file_path, e))?;

        let mut objects = HashMap::with_capacity(document.len());
        for (key, value) in document {
            let Value::Object(fields) = value else {
                return Err(ServiceError::corrupt(&self.file_path, format!("entry `{key}` is not an object")));
            };
            let entity = Entity::from_map(fields)
                .map_err(|e| ServiceError::corrupt(&self.file_path, format!("entry `{key}`: {e}")))?;
            if entity.key() != key {
                return Err(ServiceError::corrupt(
                    &self.file_path,
                    format!("entry `{key}` holds `{}`", entity.key()),
                ));
            }
            objects.insert(key, entity);
        }
        Ok(objects)
    }

    fn encode(objects: &ObjectMap) -> Result<Vec<u8>, ServiceError> {
        let document: BTreeMap<&str, Map<String, Value>> =
            objects.iter().map(|(key, entity)| (key.as_str(), entity.to_map())).collect();
        Ok(serde_json::to_vec(&document).map_err(io::Error::from)?)
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = self.file_path.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}

#[async_trait]
impl StorageEngine for FileStorage {
    async fn all(&self, kind: Option<EntityKind>) -> Result<ObjectMap, ServiceError> {
        let guard = self.objects.read().await;
        let objects = guard.as_ref().ok_or(ServiceError::NotLoaded)?;
        Ok(match kind {
            None => objects.clone(),
            Some(kind) => objects
                .iter()
                .filter(|(_, entity)| entity.kind() == kind)
                .map(|(key, entity)| (key.clone(), entity.clone()))
                .collect(),
        })
    }

    async fn add(&self, entity: &Entity) -> Result<(), ServiceError> {
        let mut guard = self.objects.write().await;
        let objects = guard.as_mut().ok_or(ServiceError::NotLoaded)?;
        let key = entity.key();
        debug!(%key, "file storage add");
        objects.insert(key, entity.clone());
        Ok(())
    }

    /// Rewrite the whole document: encode, write a sibling temp file, rename over the target.
    async fn save(&self) -> Result<(), ServiceError> {
        // Exclusive lock so concurrent saves never share the staging file.
        let guard = self.objects.write().await;
        let objects = guard.as_ref().ok_or(ServiceError::NotLoaded)?;
        let data = Self::encode(objects)?;

        common::env::ensure_parent_dir(&self.file_path)
            .await
            .map_err(|e| ServiceError::Io(io::Error::new(io::ErrorKind::Other, e)))?;
        let staging = self.staging_path();
        fs::write(&staging, data).await?;
        fs::rename(&staging, &self.file_path).await?;

        info!(path = %self.file_path.display(), objects = objects.len(), "file storage saved");
        Ok(())
    }

    async fn delete(&self, entity: Option<&Entity>) -> Result<(), ServiceError> {
        let Some(entity) = entity else { return Ok(()) };
        let mut guard = self.objects.write().await;
        let objects = guard.as_mut().ok_or(ServiceError::NotLoaded)?;
        let key = entity.key();
        let existed = objects.remove(&key).is_some();
        debug!(%key, existed, "file storage delete");
        Ok(())
    }

    /// Replace the identity map with the document's contents. On failure the
    /// previous state, loaded or not, is kept.
    async fn reload(&self) -> Result<(), ServiceError> {
        let objects = match self.read_document().await {
            Ok(objects) => objects,
            Err(e) => {
                warn!(path = %self.file_path.display(), error = %e, "file storage reload failed");
                return Err(e);
            }
        };
        let count = objects.len();
        *self.objects.write().await = Some(objects);
        info!(path = %self.file_path.display(), objects = count, "file storage loaded");
        Ok(())
    }
}
