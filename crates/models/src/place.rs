use sea_orm::{entity::prelude::*, sea_query::OnConflict, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::attributes::Place;
use crate::entity::{self as domain, EntityData};
use crate::errors::ModelError;
use crate::kind::EntityKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "places")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub city_id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub number_rooms: i32,
    pub number_bathrooms: i32,
    pub max_guest: i32,
    pub price_by_night: i32,
    #[sea_orm(column_type = "Double", nullable)]
    pub latitude: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub longitude: Option<f64>,
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
        let extra = domain::extra_from_json(EntityKind::Place, self.extra)?;
        let data = EntityData::Place(Place {
            city_id: self.city_id,
            user_id: self.user_id,
            name: self.name,
            description: self.description,
            number_rooms: self.number_rooms,
            number_bathrooms: self.number_bathrooms,
            max_guest: self.max_guest,
            price_by_night: self.price_by_night,
            latitude: self.latitude,
            longitude: self.longitude,
        });
        Ok(domain::Entity::restore(self.id, self.created_at, self.updated_at, data, extra))
    }
}

pub async fn upsert<C: ConnectionTrait>(db: &C, entity: &domain::Entity, place: &Place) -> Result<(), DbErr> {
    let am = ActiveModel {
        id: Set(entity.id().to_string()),
        created_at: Set(entity.created_at()),
        updated_at: Set(entity.updated_at()),
        city_id: Set(place.city_id.clone()),
        user_id: Set(place.user_id.clone()),
        name: Set(place.name.clone()),
        description: Set(place.description.clone()),
        number_rooms: Set(place.number_rooms),
        number_bathrooms: Set(place.number_bathrooms),
        max_guest: Set(place.max_guest),
        price_by_night: Set(place.price_by_night),
        latitude: Set(place.latitude),
        longitude: Set(place.longitude),
        extra: Set(entity.extra_json()),
    };
    Entity::insert(am)
        .on_conflict(
            OnConflict::column(Column::Id)
                .update_columns([
                    Column::UpdatedAt,
                    Column::CityId,
                    Column::UserId,
                    Column::Name,
                    Column::Description,
                    Column::NumberRooms,
                    Column::NumberBathrooms,
                    Column::MaxGuest,
                    Column::PriceByNight,
                    Column::Latitude,
                    Column::Longitude,
                    Column::Extra,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(())
}
