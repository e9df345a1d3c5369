//! Column helpers shared by the create-table migrations.
use sea_orm_migration::{prelude::*, schema::timestamp_with_time_zone, sea_orm::DbBackend};

/// Non-null UTC timestamp keeping microseconds on every backend.
///
/// MySQL's bare `TIMESTAMP` has no fractional digits and may pick up
/// `ON UPDATE CURRENT_TIMESTAMP`, so it gets `DATETIME(6)` instead.
pub fn timestamp_utc<T: IntoIden>(backend: DbBackend, col: T) -> ColumnDef {
    match backend {
        DbBackend::MySql => ColumnDef::new(col).custom(Alias::new("DATETIME(6)")).not_null().to_owned(),
        _ => timestamp_with_time_zone(col),
    }
}
