use sea_orm::{entity::prelude::*, sea_query::OnConflict, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::attributes::Amenity;
use crate::entity::{self as domain, EntityData};
use crate::errors::ModelError;
use crate::kind::EntityKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "amenities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub name: String,
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
        let extra = domain::extra_from_json(EntityKind::Amenity, self.extra)?;
        let data = EntityData::Amenity(Amenity { name: self.name });
        Ok(domain::Entity::restore(self.id, self.created_at, self.updated_at, data, extra))
    }
}

pub async fn upsert<C: ConnectionTrait>(db: &C, entity: &domain::Entity, amenity: &Amenity) -> Result<(), DbErr> {
    let am = ActiveModel {
        id: Set(entity.id().to_string()),
        created_at: Set(entity.created_at()),
        updated_at: Set(entity.updated_at()),
        name: Set(amenity.name.clone()),
        extra: Set(entity.extra_json()),
    };
    Entity::insert(am)
        .on_conflict(
            OnConflict::column(Column::Id)
                .update_columns([Column::UpdatedAt, Column::Name, Column::Extra])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(())
}
