#![cfg(test)]
use std::path::{Path, PathBuf};

use configs::{DatabaseConfig, DatabaseDriver};

/// A fresh path under the system temp dir; nothing is created.
pub fn temp_path(prefix: &str, ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{prefix}_{}.{ext}", uuid::Uuid::new_v4()))
}

/// Sqlite settings pointing at `path`, created on first connect.
pub fn sqlite_config(path: &Path) -> DatabaseConfig {
    DatabaseConfig {
        driver: DatabaseDriver::Sqlite,
        name: path.display().to_string(),
        max_connections: 4,
        ..DatabaseConfig::default()
    }
}
