use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
    #[error("corrupt store {}: {reason}", path.display())]
    CorruptStore { path: PathBuf, reason: String },
    #[error("persistence failure: {0}")]
    PersistenceFailure(String),
    #[error("store not loaded; call reload first")]
    NotLoaded,
    #[error("database error: {0}")]
    Db(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    pub fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::CorruptStore { path: path.into(), reason: reason.to_string() }
    }

    /// True when a type name did not resolve to a registered kind.
    pub fn is_unknown_kind(&self) -> bool {
        matches!(self, Self::Model(models::errors::ModelError::UnknownEntityKind(_)))
    }
}
