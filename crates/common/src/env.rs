//! Environment/runtime helpers

use std::path::Path;
use tracing::debug;

/// Make sure the directory that will hold `file` exists.
pub async fn ensure_parent_dir(file: &Path) -> anyhow::Result<()> {
    let Some(parent) = file.parent() else { return Ok(()) };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    if tokio::fs::metadata(parent).await.is_err() {
        debug!(dir = %parent.display(), "creating data directory");
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_parent() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("hbnb_env_{}", std::process::id()));
        let file = root.join("nested").join("file.json");
        ensure_parent_dir(&file).await?;
        assert!(tokio::fs::metadata(root.join("nested")).await?.is_dir());
        ensure_parent_dir(Path::new("file.json")).await?;
        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }
}
