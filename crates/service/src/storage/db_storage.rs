use std::collections::HashMap;

use async_trait::async_trait;
use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::{Entity, EntityKind};
use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::errors::ServiceError;
use crate::storage::{tables, ObjectMap, StorageEngine};

/// Relational store with no in-memory cache.
///
/// Writes are staged in a transaction (the session) that the first `add` or
/// `delete` opens and `save` commits. Reads go through the open session when
/// there is one, so staged work is visible to this store and to nobody else.
pub struct DbStorage {
    db: DatabaseConnection,
    session: Mutex<Session>,
}

#[derive(Default)]
struct Session {
    loaded: bool,
    txn: Option<DatabaseTransaction>,
}

impl Session {
    fn ensure_loaded(&self) -> Result<(), ServiceError> {
        if self.loaded { Ok(()) } else { Err(ServiceError::NotLoaded) }
    }

    /// The open transaction, beginning one if nothing is staged yet.
    async fn transaction(&mut self, db: &DatabaseConnection) -> Result<&DatabaseTransaction, ServiceError> {
        self.ensure_loaded()?;
        let txn = match self.txn.take() {
            Some(txn) => txn,
            None => db.begin().await.map_err(db_err)?,
        };
        Ok(self.txn.insert(txn))
    }

    /// Roll back and drop whatever is staged.
    async fn discard(&mut self) {
        if let Some(txn) = self.txn.take() {
            if let Err(e) = txn.rollback().await {
                warn!(error = %e, "rollback of staged session failed");
            }
        }
    }
}

fn db_err(e: DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

impl DbStorage {
    /// Open the connection pool. With `drop_existing`, every table is dropped first.
    pub async fn connect(cfg: &DatabaseConfig, drop_existing: bool) -> Result<Self, ServiceError> {
        let db = models::db::connect_with_config(cfg)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        if drop_existing {
            warn!(database = %cfg.name, "test environment; dropping all tables");
            migration::Migrator::reset(&db).await.map_err(db_err)?;
        }
        Ok(Self::with_connection(db))
    }

    pub fn with_connection(db: DatabaseConnection) -> Self {
        Self { db, session: Mutex::new(Session::default()) }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Whether uncommitted work is waiting for `save`.
    pub async fn has_staged(&self) -> bool {
        self.session.lock().await.txn.is_some()
    }
}

#[async_trait]
impl StorageEngine for DbStorage {
    async fn all(&self, kind: Option<EntityKind>) -> Result<ObjectMap, ServiceError> {
        let session = self.session.lock().await;
        session.ensure_loaded()?;

        let kinds = match kind {
            Some(kind) => vec![kind],
            None => EntityKind::ALL.to_vec(),
        };
        let mut objects = HashMap::new();
        for kind in kinds {
            let rows = match &session.txn {
                Some(txn) => tables::find_all(txn, kind).await?,
                None => tables::find_all(&self.db, kind).await?,
            };
            for entity in rows {
                objects.insert(entity.key(), entity);
            }
        }
        Ok(objects)
    }

    async fn add(&self, entity: &Entity) -> Result<(), ServiceError> {
        let mut session = self.session.lock().await;
        let txn = session.transaction(&self.db).await?;
        let result = tables::upsert(txn, entity).await;
        if let Err(e) = result {
            warn!(key = %entity.key(), error = %e, "staging failed; session rolled back");
            session.discard().await;
            return Err(ServiceError::PersistenceFailure(e.to_string()));
        }
        debug!(key = %entity.key(), "database storage add");
        Ok(())
    }

    async fn save(&self) -> Result<(), ServiceError> {
        let mut session = self.session.lock().await;
        session.ensure_loaded()?;
        let Some(txn) = session.txn.take() else {
            debug!("database storage save; nothing staged");
            return Ok(());
        };
        txn.commit().await.map_err(|e| {
            warn!(error = %e, "commit failed; transaction rolled back");
            ServiceError::PersistenceFailure(e.to_string())
        })?;
        info!("database storage committed");
        Ok(())
    }

    async fn delete(&self, entity: Option<&Entity>) -> Result<(), ServiceError> {
        let Some(entity) = entity else { return Ok(()) };
        let mut session = self.session.lock().await;
        let txn = session.transaction(&self.db).await?;
        let result = tables::delete(txn, entity.kind(), entity.id()).await;
        match result {
            Ok(rows) => {
                debug!(key = %entity.key(), rows, "database storage delete");
                Ok(())
            }
            Err(e) => {
                warn!(key = %entity.key(), error = %e, "staging failed; session rolled back");
                session.discard().await;
                Err(ServiceError::PersistenceFailure(e.to_string()))
            }
        }
    }

    /// Drop any staged work, make sure every table exists, and attach.
    async fn reload(&self) -> Result<(), ServiceError> {
        let mut session = self.session.lock().await;
        if session.txn.is_some() {
            warn!("reload discards staged work");
        }
        session.discard().await;
        migration::Migrator::up(&self.db, None).await.map_err(db_err)?;
        session.loaded = true;
        info!("database storage attached");
        Ok(())
    }
}
