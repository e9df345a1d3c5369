use std::path::PathBuf;

use configs::{AppConfig, BackendKind, DatabaseDriver};
use models::attributes::{Review, User};
use models::{Entity, EntityData, EntityKind};
use serde_json::json;
use service::Storage;

struct Fixture {
    cfg: AppConfig,
    path: PathBuf,
}

impl Fixture {
    fn new(backend: BackendKind) -> Self {
        let ext = match backend {
            BackendKind::File => "json",
            BackendKind::Db => "db",
        };
        let path = std::env::temp_dir().join(format!("hbnb_parity_{}.{ext}", uuid::Uuid::new_v4()));
        let mut cfg = AppConfig::default();
        cfg.storage.backend = backend;
        match backend {
            BackendKind::File => cfg.storage.file_path = path.display().to_string(),
            BackendKind::Db => {
                cfg.database.driver = DatabaseDriver::Sqlite;
                cfg.database.name = path.display().to_string();
                cfg.database.max_connections = 4;
            }
        }
        Self { cfg, path }
    }

    async fn open(&self) -> Result<Storage, service::ServiceError> {
        Storage::open(&self.cfg).await
    }

    async fn cleanup(self) {
        let _ = tokio::fs::remove_file(&self.path).await;
    }
}

const BACKENDS: [BackendKind; 2] = [BackendKind::File, BackendKind::Db];

#[tokio::test]
async fn saved_entity_survives_a_fresh_store() -> Result<(), anyhow::Error> {
    for backend in BACKENDS {
        let fx = Fixture::new(backend);
        let storage = fx.open().await?;

        let mut user = Entity::from_data(EntityData::User(User {
            email: "ada@example.com".into(),
            first_name: "Ada".into(),
            ..User::default()
        }));
        user.set_attribute("tags", json!(["admin", "beta"]))?;
        storage.add(&user).await?;
        storage.save().await?;
        drop(storage);

        let fresh = fx.open().await?;
        let users = fresh.all_named("User").await?;
        assert_eq!(users.len(), 1, "{backend}");
        let key = format!("User.{}", user.id());
        assert_eq!(users[&key].to_map(), user.to_map(), "{backend}");
        assert_eq!(users[&key].attribute("tags"), Some(&json!(["admin", "beta"])), "{backend}");

        drop(fresh);
        fx.cleanup().await;
    }
    Ok(())
}

#[tokio::test]
async fn deleted_entity_is_gone_after_save() -> Result<(), anyhow::Error> {
    for backend in BACKENDS {
        let fx = Fixture::new(backend);
        let storage = fx.open().await?;
        let keep = Entity::new(EntityKind::Amenity);
        let gone = Entity::new(EntityKind::Amenity);
        storage.add(&keep).await?;
        storage.add(&gone).await?;
        storage.save().await?;

        storage.delete(Some(&gone)).await?;
        assert!(!storage.all(None).await?.contains_key(&gone.key()), "{backend}");
        storage.save().await?;
        drop(storage);

        let fresh = fx.open().await?;
        let all = fresh.all(None).await?;
        assert!(all.contains_key(&keep.key()), "{backend}");
        assert!(!all.contains_key(&gone.key()), "{backend}");

        drop(fresh);
        fx.cleanup().await;
    }
    Ok(())
}

#[tokio::test]
async fn unregistered_delete_is_a_noop() -> Result<(), anyhow::Error> {
    for backend in BACKENDS {
        let fx = Fixture::new(backend);
        let storage = fx.open().await?;
        storage.delete(Some(&Entity::new(EntityKind::Review))).await?;
        storage.delete(None).await?;
        storage.save().await?;
        assert!(storage.all(None).await?.is_empty(), "{backend}");

        drop(storage);
        fx.cleanup().await;
    }
    Ok(())
}

#[tokio::test]
async fn filter_and_keys_agree_across_backends() -> Result<(), anyhow::Error> {
    for backend in BACKENDS {
        let fx = Fixture::new(backend);
        let storage = fx.open().await?;
        let review = Entity::from_data(EntityData::Review(Review { text: "Great stay".into(), ..Review::default() }));
        let state = Entity::new(EntityKind::State);
        storage.add(&review).await?;
        storage.add(&state).await?;
        storage.save().await?;

        let reviews = storage.all(Some(EntityKind::Review)).await?;
        assert_eq!(reviews.keys().collect::<Vec<_>>(), vec![&review.key()], "{backend}");
        assert!(storage.all(Some(EntityKind::Place)).await?.is_empty(), "{backend}");
        assert!(storage.all_named("Hotel").await.is_err(), "{backend}");

        drop(storage);
        fx.cleanup().await;
    }
    Ok(())
}

#[tokio::test]
async fn successive_entities_get_distinct_ids() -> Result<(), anyhow::Error> {
    for backend in BACKENDS {
        let fx = Fixture::new(backend);
        let storage = fx.open().await?;
        let mut previous: Option<Entity> = None;
        for _ in 0..20 {
            let e = Entity::new(EntityKind::BaseModel);
            if let Some(p) = &previous {
                assert_ne!(p.id(), e.id());
                assert!(p.created_at() <= e.created_at());
            }
            storage.add(&e).await?;
            previous = Some(e);
        }
        storage.save().await?;
        assert_eq!(storage.all(Some(EntityKind::BaseModel)).await?.len(), 20, "{backend}");

        drop(storage);
        fx.cleanup().await;
    }
    Ok(())
}
