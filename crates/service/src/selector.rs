use std::sync::Arc;

use configs::{AppConfig, BackendKind};
use models::{Entity, EntityData, EntityKind, ModelError};
use tracing::info;

use crate::errors::ServiceError;
use crate::storage::{DbStorage, FileStorage, ObjectMap, StorageEngine};

/// Handle to the one store the process runs with.
///
/// Built once at startup by [`Storage::open`] and cloned into whatever needs
/// persistence. Clones share the same backend.
#[derive(Clone)]
pub struct Storage {
    engine: Arc<dyn StorageEngine>,
    backend: BackendKind,
}

impl Storage {
    /// Construct the configured backend and reload it.
    pub async fn open(cfg: &AppConfig) -> Result<Self, ServiceError> {
        let backend = cfg.storage.backend;
        let engine: Arc<dyn StorageEngine> = match backend {
            BackendKind::File => Arc::new(FileStorage::new(&cfg.storage.file_path)),
            BackendKind::Db => Arc::new(DbStorage::connect(&cfg.database, cfg.is_test()).await?),
        };
        let storage = Self::from_engine(engine, backend);
        storage.reload().await?;
        info!(%backend, "storage ready");
        Ok(storage)
    }

    /// Wrap an already built engine. The caller decides when to reload.
    pub fn from_engine(engine: Arc<dyn StorageEngine>, backend: BackendKind) -> Self {
        Self { engine, backend }
    }

    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    pub async fn all(&self, kind: Option<EntityKind>) -> Result<ObjectMap, ServiceError> {
        self.engine.all(kind).await
    }

    /// `all` filtered by a type name, e.g. `"User"`.
    pub async fn all_named(&self, name: &str) -> Result<ObjectMap, ServiceError> {
        let kind: EntityKind = name.parse()?;
        self.engine.all(Some(kind)).await
    }

    pub async fn add(&self, entity: &Entity) -> Result<(), ServiceError> {
        self.engine.add(entity).await
    }

    pub async fn save(&self) -> Result<(), ServiceError> {
        self.engine.save().await
    }

    pub async fn delete(&self, entity: Option<&Entity>) -> Result<(), ServiceError> {
        self.engine.delete(entity).await
    }

    pub async fn reload(&self) -> Result<(), ServiceError> {
        self.engine.reload().await
    }

    /// Refresh `updated_at`, register the entity and save.
    pub async fn persist(&self, entity: &mut Entity) -> Result<(), ServiceError> {
        entity.touch();
        self.engine.add(entity).await?;
        self.engine.save().await
    }

    /// Delete and save.
    pub async fn remove(&self, entity: &Entity) -> Result<(), ServiceError> {
        self.engine.delete(Some(entity)).await?;
        self.engine.save().await
    }

    /// Cities whose `state_id` is the id of `state`.
    pub async fn cities_of(&self, state: &Entity) -> Result<Vec<Entity>, ServiceError> {
        if state.kind() != EntityKind::State {
            return Err(ModelError::invalid_attribute(state.kind(), "cities are only listed for a State").into());
        }
        let mut cities: Vec<Entity> = self
            .engine
            .all(Some(EntityKind::City))
            .await?
            .into_values()
            .filter(|city| matches!(city.data(), EntityData::City(c) if c.state_id == state.id()))
            .collect();
        cities.sort_by(|a, b| a.created_at().cmp(&b.created_at()).then_with(|| a.id().cmp(b.id())));
        Ok(cities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::temp_path;
    use models::attributes::City;

    fn file_config(path: &std::path::Path) -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.storage.file_path = path.display().to_string();
        cfg
    }

    fn city_in(state: &Entity, name: &str) -> Entity {
        Entity::from_data(EntityData::City(City { state_id: state.id().to_string(), name: name.into() }))
    }

    #[tokio::test]
    async fn open_selects_and_reloads_file_backend() -> Result<(), anyhow::Error> {
        let tmp = temp_path("selector_open", "json");
        let storage = Storage::open(&file_config(&tmp)).await?;
        assert_eq!(storage.backend(), BackendKind::File);
        assert!(storage.all(None).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn persist_touches_and_saves() -> Result<(), anyhow::Error> {
        let tmp = temp_path("selector_persist", "json");
        let storage = Storage::open(&file_config(&tmp)).await?;

        let mut user = Entity::new(EntityKind::User);
        let before = user.updated_at();
        storage.persist(&mut user).await?;
        assert!(user.updated_at() >= before);

        let fresh = Storage::open(&file_config(&tmp)).await?;
        let users = fresh.all_named("User").await?;
        assert_eq!(users.len(), 1);
        assert_eq!(users[&format!("User.{}", user.id())], user);

        fresh.remove(&user).await?;
        let again = Storage::open(&file_config(&tmp)).await?;
        assert!(again.all(None).await?.is_empty());

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn unknown_type_name_is_rejected() -> Result<(), anyhow::Error> {
        let tmp = temp_path("selector_unknown", "json");
        let storage = Storage::open(&file_config(&tmp)).await?;
        let err = storage.all_named("Spaceship").await.unwrap_err();
        assert!(err.is_unknown_kind());
        Ok(())
    }

    #[tokio::test]
    async fn cities_of_lists_only_that_state() -> Result<(), anyhow::Error> {
        let tmp = temp_path("selector_cities", "json");
        let storage = Storage::open(&file_config(&tmp)).await?;
        let california = Entity::new(EntityKind::State);
        let nevada = Entity::new(EntityKind::State);
        let sf = city_in(&california, "San Francisco");
        let la = city_in(&california, "Los Angeles");
        let reno = city_in(&nevada, "Reno");
        for e in [&california, &nevada, &sf, &la, &reno] {
            storage.add(e).await?;
        }

        let cities = storage.cities_of(&california).await?;
        let ids: Vec<&str> = cities.iter().map(|c| c.id()).collect();
        assert_eq!(cities.len(), 2);
        assert!(ids.contains(&sf.id()) && ids.contains(&la.id()));
        assert!(storage.cities_of(&Entity::new(EntityKind::State)).await?.is_empty());
        assert!(storage.cities_of(&sf).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn clones_share_one_backend() -> Result<(), anyhow::Error> {
        let tmp = temp_path("selector_clone", "json");
        let storage = Storage::open(&file_config(&tmp)).await?;
        let handle = storage.clone();
        let amenity = Entity::new(EntityKind::Amenity);
        handle.add(&amenity).await?;
        assert!(storage.all(Some(EntityKind::Amenity)).await?.contains_key(&amenity.key()));
        Ok(())
    }
}
