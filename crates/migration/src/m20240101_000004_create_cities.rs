//! Create `cities` table.
//!
//! `state_id` is indexed but carries no foreign key: the store stages rows of
//! any kind in any order inside one transaction.
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
                    .table(Cities::Table)
                    .if_not_exists()
                    .col(string_len(Cities::Id, 60).primary_key())
                    .col(timestamp_utc(backend, Cities::CreatedAt))
                    .col(timestamp_utc(backend, Cities::UpdatedAt))
                    .col(string_len(Cities::StateId, 60))
                    .col(string_len(Cities::Name, 128))
                    .col(json(Cities::Extra))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_cities_state_id")
                    .table(Cities::Table)
                    .col(Cities::StateId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Cities::Table).if_exists().to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Cities { Table, Id, CreatedAt, UpdatedAt, StateId, Name, Extra }
