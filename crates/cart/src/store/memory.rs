//! In-memory cart store.

use std::sync::Mutex;

use crate::error::CartError;
use crate::snapshot::CartSnapshot;

use super::CartStore;

/// Volatile store holding the snapshot in process memory.
///
/// Used for guest carts that should not outlive the process, and as the
/// test double for the other strategies.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Mutex<Option<CartSnapshot>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for MemoryStore {
    async fn load(&self) -> Result<Option<CartSnapshot>, CartError> {
        Ok(self.snapshot.lock().map_or(None, |guard| guard.clone()))
    }

    async fn save(&self, snapshot: CartSnapshot) -> Result<(), CartError> {
        if let Ok(mut guard) = self.snapshot.lock() {
            *guard = Some(snapshot);
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), CartError> {
        if let Ok(mut guard) = self.snapshot.lock() {
            *guard = None;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use octocat_supply_core::ProductId;
    use rust_decimal::dec;

    use crate::item::CartItem;

    use super::*;

    #[tokio::test]
    async fn test_save_load_clear() {
        let store = MemoryStore::new();
        assert!(store.load().await.unwrap().is_none());

        let snapshot = CartSnapshot {
            items: vec![CartItem::new(ProductId::new(1), "Widget".into(), dec!(5), 1)],
        };
        store.save(snapshot.clone()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(snapshot));

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }
}
