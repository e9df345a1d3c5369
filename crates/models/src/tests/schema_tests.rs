use configs::{DatabaseConfig, DatabaseDriver};
use migration::MigratorTrait;
use sea_orm::{DatabaseConnection, EntityTrait, Iterable};
use serde_json::json;
use uuid::Uuid;

use crate::attributes::{Place, User};
use crate::db::connect_with_config;
use crate::{amenity, base_model, city, place, review, state, user, Entity, EntityData, EntityKind};

/// Fresh SQLite file with every table created.
async fn setup_test_db() -> anyhow::Result<(DatabaseConnection, std::path::PathBuf)> {
    let path = std::env::temp_dir().join(format!("models_schema_{}.db", Uuid::new_v4()));
    let cfg = DatabaseConfig {
        driver: DatabaseDriver::Sqlite,
        name: path.display().to_string(),
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok((db, path))
}

#[tokio::test]
async fn user_row_round_trips() -> anyhow::Result<()> {
    let (db, path) = setup_test_db().await?;

    let mut entity = Entity::from_data(EntityData::User(User {
        email: "airbnb_clone@alx.com".into(),
        password: "1234password".into(),
        first_name: "youssef".into(),
        last_name: "bouryal".into(),
    }));
    entity.set_attribute("nickname", json!("yb"))?;
    let EntityData::User(attrs) = entity.data().clone() else { unreachable!() };
    user::upsert(&db, &entity, &attrs).await?;

    let rows = user::Entity::find().all(&db).await?;
    assert_eq!(rows.len(), 1);
    let back = rows.into_iter().next().unwrap().into_entity()?;
    assert_eq!(back, entity);

    drop(db);
    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}

#[tokio::test]
async fn upsert_overwrites_existing_row() -> anyhow::Result<()> {
    let (db, path) = setup_test_db().await?;

    let mut entity = Entity::from_data(EntityData::Place(Place { name: "Loft".into(), ..Place::default() }));
    let EntityData::Place(first) = entity.data().clone() else { unreachable!() };
    place::upsert(&db, &entity, &first).await?;

    if let EntityData::Place(p) = entity.data_mut() {
        p.name = "Penthouse".into();
        p.latitude = Some(48.5);
        p.description = Some("top floor".into());
    }
    entity.touch();
    let EntityData::Place(second) = entity.data().clone() else { unreachable!() };
    place::upsert(&db, &entity, &second).await?;

    let rows = place::Entity::find().all(&db).await?;
    assert_eq!(rows.len(), 1);
    let back = rows.into_iter().next().unwrap().into_entity()?;
    assert_eq!(back, entity);

    drop(db);
    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}

#[tokio::test]
async fn base_model_keeps_extras() -> anyhow::Result<()> {
    let (db, path) = setup_test_db().await?;

    let mut entity = Entity::new(EntityKind::BaseModel);
    entity.set_attribute("name", json!("John"))?;
    entity.set_attribute("number", json!(10))?;
    base_model::upsert(&db, &entity).await?;

    let back = base_model::Entity::find_by_id(entity.id().to_string())
        .one(&db)
        .await?
        .expect("row present")
        .into_entity()?;
    assert_eq!(back.attribute("name"), Some(&json!("John")));
    assert_eq!(back, entity);

    drop(db);
    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}

#[test]
fn tables_declare_no_relations() {
    assert_eq!(base_model::Relation::iter().count(), 0);
    assert_eq!(user::Relation::iter().count(), 0);
    assert_eq!(place::Relation::iter().count(), 0);
    assert_eq!(state::Relation::iter().count(), 0);
    assert_eq!(city::Relation::iter().count(), 0);
    assert_eq!(amenity::Relation::iter().count(), 0);
    assert_eq!(review::Relation::iter().count(), 0);
}
