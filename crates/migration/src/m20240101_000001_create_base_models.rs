//! Create `base_models` table.
//!
//! Holds plain objects with no typed attributes; everything lives in `extra`.
use sea_orm_migration::{prelude::*, schema::*};

use crate::columns::timestamp_utc;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        manager
            .create_table(
                Table::create()
                    .table(BaseModels::Table)
                    .if_not_exists()
                    .col(string_len(BaseModels::Id, 60).primary_key())
                    .col(timestamp_utc(backend, BaseModels::CreatedAt))
                    .col(timestamp_utc(backend, BaseModels::UpdatedAt))
                    .col(json(BaseModels::Extra))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(BaseModels::Table).if_exists().to_owned()).await
    }
}

#[derive(DeriveIden)]
enum BaseModels { Table, Id, CreatedAt, UpdatedAt, Extra }
