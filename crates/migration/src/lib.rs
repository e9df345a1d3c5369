//! Migrator creating one table per entity kind.
//! Every migration uses `if_not_exists`, so running `up` against an existing
//! schema is a no-op.
pub use sea_orm_migration::prelude::*;

pub mod columns;

mod m20240101_000001_create_base_models;
mod m20240101_000002_create_users;
mod m20240101_000003_create_states;
mod m20240101_000004_create_cities;
mod m20240101_000005_create_amenities;
mod m20240101_000006_create_places;
mod m20240101_000007_create_reviews;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_base_models::Migration),
            Box::new(m20240101_000002_create_users::Migration),
            Box::new(m20240101_000003_create_states::Migration),
            Box::new(m20240101_000004_create_cities::Migration),
            Box::new(m20240101_000005_create_amenities::Migration),
            Box::new(m20240101_000006_create_places::Migration),
            Box::new(m20240101_000007_create_reviews::Migration),
        ]
    }
}
