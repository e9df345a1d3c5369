//! Kind-to-table dispatch for the database backend.
//!
//! Each function matches exhaustively on the kind (or payload), so a new
//! kind cannot be added without deciding where its rows live.

use models::{amenity, base_model, city, place, review, state, user};
use models::{Entity, EntityData, EntityKind};
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};

use crate::errors::ServiceError;

pub(crate) async fn upsert<C: ConnectionTrait>(db: &C, entity: &Entity) -> Result<(), DbErr> {
    match entity.data() {
        EntityData::BaseModel => base_model::upsert(db, entity).await,
        EntityData::User(attrs) => user::upsert(db, entity, attrs).await,
        EntityData::Place(attrs) => place::upsert(db, entity, attrs).await,
        EntityData::State(attrs) => state::upsert(db, entity, attrs).await,
        EntityData::City(attrs) => city::upsert(db, entity, attrs).await,
        EntityData::Amenity(attrs) => amenity::upsert(db, entity, attrs).await,
        EntityData::Review(attrs) => review::upsert(db, entity, attrs).await,
    }
}

pub(crate) async fn delete<C: ConnectionTrait>(db: &C, kind: EntityKind, id: &str) -> Result<u64, DbErr> {
    let id = id.to_string();
    let res = match kind {
        EntityKind::BaseModel => base_model::Entity::delete_by_id(id).exec(db).await?,
        EntityKind::User => user::Entity::delete_by_id(id).exec(db).await?,
        EntityKind::Place => place::Entity::delete_by_id(id).exec(db).await?,
        EntityKind::State => state::Entity::delete_by_id(id).exec(db).await?,
        EntityKind::City => city::Entity::delete_by_id(id).exec(db).await?,
        EntityKind::Amenity => amenity::Entity::delete_by_id(id).exec(db).await?,
        EntityKind::Review => review::Entity::delete_by_id(id).exec(db).await?,
    };
    Ok(res.rows_affected)
}

/// Every row of one kind, rebuilt as entities.
pub(crate) async fn find_all<C: ConnectionTrait>(db: &C, kind: EntityKind) -> Result<Vec<Entity>, ServiceError> {
    fn rebuild<M>(rows: Vec<M>, f: fn(M) -> Result<Entity, models::ModelError>) -> Result<Vec<Entity>, ServiceError> {
        rows.into_iter().map(|row| f(row).map_err(ServiceError::from)).collect()
    }

    let db_err = |e: DbErr| ServiceError::Db(e.to_string());
    match kind {
        EntityKind::BaseModel => {
            rebuild(base_model::Entity::find().all(db).await.map_err(db_err)?, base_model::Model::into_entity)
        }
        EntityKind::User => rebuild(user::Entity::find().all(db).await.map_err(db_err)?, user::Model::into_entity),
        EntityKind::Place => rebuild(place::Entity::find().all(db).await.map_err(db_err)?, place::Model::into_entity),
        EntityKind::State => rebuild(state::Entity::find().all(db).await.map_err(db_err)?, state::Model::into_entity),
        EntityKind::City => rebuild(city::Entity::find().all(db).await.map_err(db_err)?, city::Model::into_entity),
        EntityKind::Amenity => {
            rebuild(amenity::Entity::find().all(db).await.map_err(db_err)?, amenity::Model::into_entity)
        }
        EntityKind::Review => {
            rebuild(review::Entity::find().all(db).await.map_err(db_err)?, review::Model::into_entity)
        }
    }
}
