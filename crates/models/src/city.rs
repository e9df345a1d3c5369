use sea_orm::{entity::prelude::*, sea_query::OnConflict, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::attributes::City;
use crate::entity::{self as domain, EntityData};
use crate::errors::ModelError;
use crate::kind::EntityKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub state_id: String,
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
        let extra = domain::extra_from_json(EntityKind::City, self.extra)?;
        let data = EntityData::City(City { state_id: self.state_id, name: self.name });
        Ok(domain::Entity::restore(self.id, self.created_at, self.updated_at, data, extra))
    }
}

pub async fn upsert<C: ConnectionTrait>(db: &C, entity: &domain::Entity, city: &City) -> Result<(), DbErr> {
    let am = ActiveModel {
        id: Set(entity.id().to_string()),
        created_at: Set(entity.created_at()),
        updated_at: Set(entity.updated_at()),
        state_id: Set(city.state_id.clone()),
        name: Set(city.name.clone()),
        extra: Set(entity.extra_json()),
    };
    Entity::insert(am)
        .on_conflict(
            OnConflict::column(Column::Id)
                .update_columns([Column::UpdatedAt, Column::StateId, Column::Name, Column::Extra])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(())
}
