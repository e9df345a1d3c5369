use sea_orm::{entity::prelude::*, sea_query::OnConflict, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::entity::{self as domain, EntityData};
use crate::errors::ModelError;
use crate::kind::EntityKind;

/// Rows for plain `BaseModel` objects: identity, timestamps and extras only.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "base_models")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub extra: Json,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_entity(self) -> Result<domain::Entity, ModelError> {
        let extra = domain::extra_from_json(EntityKind::BaseModel, self.extra)?;
        Ok(domain::Entity::restore(self.id, self.created_at, self.updated_at, EntityData::BaseModel, extra))
    }
}

pub async fn upsert<C: ConnectionTrait>(db: &C, entity: &domain::Entity) -> Result<(), DbErr> {
    let am = ActiveModel {
        id: Set(entity.id().to_string()),
        created_at: Set(entity.created_at()),
        updated_at: Set(entity.updated_at()),
        extra: Set(entity.extra_json()),
    };
    Entity::insert(am)
        .on_conflict(OnConflict::column(Column::Id).update_columns([Column::UpdatedAt, Column::Extra]).to_owned())
        .exec_without_returning(db)
        .await?;
    Ok(())
}
