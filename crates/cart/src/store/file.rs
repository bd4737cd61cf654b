//! File-backed cart store.

use std::path::{Path, PathBuf};

use crate::error::CartError;
use crate::snapshot::CartSnapshot;

use super::CartStore;

/// Store persisting the snapshot as a JSON file.
///
/// The durable analogue of the browser's key-value cart storage. Writes go
/// to a sibling temp file first and are renamed into place, so a crash
/// mid-save never leaves a truncated snapshot behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl CartStore for FileStore {
    async fn load(&self) -> Result<Option<CartSnapshot>, CartError> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let snapshot = CartSnapshot::from_json(&json)?;
        Ok(Some(snapshot))
    }

    async fn save(&self, snapshot: CartSnapshot) -> Result<(), CartError> {
        let json = snapshot.to_json()?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, json.as_bytes()).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), CartError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use octocat_supply_core::ProductId;
    use rust_decimal::dec;

    use crate::item::CartItem;

    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileStore {
        FileStore::new(dir.path().join("cart.json"))
    }

    #[tokio::test]
    async fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let snapshot = CartSnapshot {
            items: vec![CartItem::new(ProductId::new(7), "Cable".into(), dec!(9.99), 2)],
        };
        store.save(snapshot.clone()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(snapshot));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        tokio::fs::write(store.path(), b"{{{ not json")
            .await
            .unwrap();

        assert!(matches!(
            store.load().await,
            Err(CartError::Snapshot(_))
        ));
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.clear().await.unwrap();

        store
            .save(CartSnapshot::default())
            .await
            .unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }
}
