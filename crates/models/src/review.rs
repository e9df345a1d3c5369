use sea_orm::{entity::prelude::*, sea_query::OnConflict, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::attributes::Review;
use crate::entity::{self as domain, EntityData};
use crate::errors::ModelError;
use crate::kind::EntityKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub place_id: String,
    pub user_id: String,
    pub text: String,
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
        let extra = domain::extra_from_json(EntityKind::Review, self.extra)?;
        let data = EntityData::Review(Review { place_id: self.place_id, user_id: self.user_id, text: self.text });
        Ok(domain::Entity::restore(self.id, self.created_at, self.updated_at, data, extra))
    }
}

pub async fn upsert<C: ConnectionTrait>(db: &C, entity: &domain::Entity, review: &Review) -> Result<(), DbErr> {
    let am = ActiveModel {
        id: Set(entity.id().to_string()),
        created_at: Set(entity.created_at()),
        updated_at: Set(entity.updated_at()),
        place_id: Set(review.place_id.clone()),
        user_id: Set(review.user_id.clone()),
        text: Set(review.text.clone()),
        extra: Set(entity.extra_json()),
    };
    Entity::insert(am)
        .on_conflict(
            OnConflict::column(Column::Id)
                .update_columns([Column::UpdatedAt, Column::PlaceId, Column::UserId, Column::Text, Column::Extra])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(())
}
