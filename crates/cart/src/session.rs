//! Store-backed cart session.
//!
//! Wires the pure reducer to a persistence strategy: every dispatch applies
//! the transition, then schedules a debounced save so rapid mutations
//! coalesce into one write. The single most recent pre-mutation state is
//! retained for undo within a bounded window.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::error::CartError;
use crate::policy::PricingPolicy;
use crate::reducer::{CartAction, apply};
use crate::snapshot::CartSnapshot;
use crate::state::CartState;
use crate::store::CartStore;

/// Default delay before a dispatched mutation is persisted.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Default window during which the last mutation can be undone.
pub const DEFAULT_UNDO_WINDOW: Duration = Duration::from_secs(5);

struct Undo {
    state: CartState,
    expires_at: Instant,
}

/// A cart bound to a persistence strategy.
pub struct CartSession<S: CartStore> {
    state: CartState,
    policy: PricingPolicy,
    store: Arc<S>,
    debounce: Duration,
    undo_window: Duration,
    undo: Option<Undo>,
    pending_save: Option<JoinHandle<()>>,
}

impl<S: CartStore> CartSession<S> {
    /// Create an empty session over the given store and policy.
    #[must_use]
    pub fn new(store: S, policy: PricingPolicy) -> Self {
        Self {
            state: CartState::empty(),
            policy,
            store: Arc::new(store),
            debounce: DEFAULT_DEBOUNCE,
            undo_window: DEFAULT_UNDO_WINDOW,
            undo: None,
            pending_save: None,
        }
    }

    /// Override the save debounce delay.
    #[must_use]
    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Override the undo window.
    #[must_use]
    pub const fn with_undo_window(mut self, window: Duration) -> Self {
        self.undo_window = window;
        self
    }

    /// The current cart state.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// The pricing policy in effect.
    #[must_use]
    pub const fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Load and validate the persisted snapshot, replacing the state.
    ///
    /// Corrupt storage is logged and treated as an empty cart; the bad
    /// payload is cleared so the next load starts clean. Undo history does
    /// not survive hydration.
    pub async fn hydrate(&mut self) {
        match self.store.load().await {
            Ok(Some(snapshot)) => {
                self.state = apply(
                    &self.state,
                    CartAction::Hydrate(snapshot.validate()),
                    &self.policy,
                );
            }
            Ok(None) => self.state = CartState::empty(),
            Err(err) => {
                tracing::warn!("discarding corrupt cart snapshot: {err}");
                if let Err(err) = self.store.clear().await {
                    tracing::warn!("failed to clear corrupt cart snapshot: {err}");
                }
                self.state = CartState::empty();
            }
        }
        self.undo = None;
    }

    /// Apply a transition and schedule a debounced save.
    ///
    /// Mutating actions record the pre-mutation state for [`undo`];
    /// hydration does not. Actions that leave the state unchanged (removing
    /// an absent product, adding zero quantity) are dropped entirely so they
    /// neither clobber a still-valid undo nor trigger a save.
    ///
    /// [`undo`]: CartSession::undo
    pub fn dispatch(&mut self, action: CartAction) {
        let is_hydrate = matches!(action, CartAction::Hydrate(_));
        let next = apply(&self.state, action, &self.policy);
        if next == self.state {
            return;
        }
        if !is_hydrate {
            self.undo = Some(Undo {
                state: self.state.clone(),
                expires_at: Instant::now() + self.undo_window,
            });
        }
        self.state = next;
        self.schedule_save();
    }

    /// Whether an undoable mutation is still inside its window.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.undo
            .as_ref()
            .is_some_and(|undo| Instant::now() <= undo.expires_at)
    }

    /// Restore the pre-mutation state of the last dispatch.
    ///
    /// Returns `false` when there is nothing to undo or the window has
    /// expired. Only one level of undo is retained.
    pub fn undo(&mut self) -> bool {
        let Some(undo) = self.undo.take() else {
            return false;
        };
        if Instant::now() > undo.expires_at {
            return false;
        }
        self.state = undo.state;
        self.schedule_save();
        true
    }

    /// Persist the current state immediately, cancelling any pending save.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the write fails.
    pub async fn flush(&mut self) -> Result<(), CartError> {
        if let Some(pending) = self.pending_save.take() {
            pending.abort();
        }
        self.store.save(CartSnapshot::of(&self.state)).await
    }

    fn schedule_save(&mut self) {
        if let Some(pending) = self.pending_save.take() {
            pending.abort();
        }
        let store = Arc::clone(&self.store);
        let snapshot = CartSnapshot::of(&self.state);
        let delay = self.debounce;
        self.pending_save = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(err) = store.save(snapshot).await {
                tracing::warn!("failed to persist cart snapshot: {err}");
            }
        }));
    }
}

impl<S: CartStore> Drop for CartSession<S> {
    fn drop(&mut self) {
        // A pending save may still run to completion; only an unflushed
        // session dropped inside the debounce window loses the last write.
        if let Some(pending) = self.pending_save.take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use octocat_supply_core::ProductId;
    use rust_decimal::dec;

    use crate::item::CartItem;
    use crate::store::MemoryStore;

    use super::*;

    /// Store double counting how many saves actually land.
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        saves: AtomicUsize,
    }

    impl CartStore for CountingStore {
        async fn load(&self) -> Result<Option<CartSnapshot>, CartError> {
            self.inner.load().await
        }

        async fn save(&self, snapshot: CartSnapshot) -> Result<(), CartError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            self.inner.save(snapshot).await
        }

        async fn clear(&self) -> Result<(), CartError> {
            self.inner.clear().await
        }
    }

    fn widget(id: i32) -> CartItem {
        CartItem::new(ProductId::new(id), format!("Widget {id}"), dec!(10), 1)
    }

    fn add(id: i32, quantity: u32) -> CartAction {
        CartAction::AddItem {
            item: widget(id),
            quantity,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_persists_after_debounce() {
        let mut session = CartSession::new(MemoryStore::new(), PricingPolicy::default());
        session.dispatch(add(1, 2));

        tokio::time::sleep(Duration::from_millis(400)).await;

        let saved = session.store.load().await.unwrap().unwrap();
        assert_eq!(saved.items.len(), 1);
        assert_eq!(saved.items.first().unwrap().quantity, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_dispatches_coalesce_into_one_save() {
        let mut session = CartSession::new(CountingStore::default(), PricingPolicy::default());
        session.dispatch(add(1, 1));
        session.dispatch(add(2, 1));
        session.dispatch(add(3, 1));

        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(session.store.saves.load(Ordering::SeqCst), 1);
        let saved = session.store.load().await.unwrap().unwrap();
        assert_eq!(saved.items.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_undo_inside_window() {
        let mut session = CartSession::new(MemoryStore::new(), PricingPolicy::default());
        session.dispatch(add(1, 2));
        session.dispatch(add(1, 3));
        assert_eq!(session.state().product_quantity(ProductId::new(1)), 5);

        assert!(session.can_undo());
        assert!(session.undo());
        assert_eq!(session.state().product_quantity(ProductId::new(1)), 2);

        // Only one level of undo is retained.
        assert!(!session.undo());
    }

    #[tokio::test(start_paused = true)]
    async fn test_noop_dispatch_keeps_prior_undo() {
        let mut session = CartSession::new(MemoryStore::new(), PricingPolicy::default());
        session.dispatch(add(1, 2));
        session.dispatch(add(1, 3));

        // Removing a product that was never added changes nothing and must
        // not consume the undo of the real mutation.
        session.dispatch(CartAction::RemoveItem {
            product_id: ProductId::new(99),
        });

        assert!(session.undo());
        assert_eq!(session.state().product_quantity(ProductId::new(1)), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_undo_expires_after_window() {
        let mut session = CartSession::new(MemoryStore::new(), PricingPolicy::default());
        session.dispatch(add(1, 1));

        tokio::time::sleep(Duration::from_secs(6)).await;

        assert!(!session.can_undo());
        assert!(!session.undo());
        assert_eq!(session.state().product_quantity(ProductId::new(1)), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hydrate_restores_persisted_state() {
        let store = MemoryStore::new();
        store
            .save(CartSnapshot {
                items: vec![widget(4)],
            })
            .await
            .unwrap();

        let mut session = CartSession::new(store, PricingPolicy::default());
        session.hydrate().await;

        assert!(session.state().is_in_cart(ProductId::new(4)));
        assert_eq!(session.state().item_count, 1);
        assert!(!session.can_undo());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hydrate_validates_snapshot() {
        let store = MemoryStore::new();
        let mut zero = widget(1);
        zero.quantity = 0;
        store
            .save(CartSnapshot {
                items: vec![zero, widget(2)],
            })
            .await
            .unwrap();

        let mut session = CartSession::new(store, PricingPolicy::default());
        session.hydrate().await;

        assert!(!session.state().is_in_cart(ProductId::new(1)));
        assert!(session.state().is_in_cart(ProductId::new(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_persists_immediately() {
        let mut session = CartSession::new(CountingStore::default(), PricingPolicy::default());
        session.dispatch(add(1, 1));
        session.flush().await.unwrap();

        // The debounced save was cancelled; only the flush landed.
        assert_eq!(session.store.saves.load(Ordering::SeqCst), 1);
        assert!(session.store.load().await.unwrap().is_some());
    }
}
