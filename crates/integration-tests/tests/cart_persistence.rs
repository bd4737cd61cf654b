//! Cart persistence through a file-backed session.
//!
//! These run under tokio's paused clock, so the debounce and undo windows
//! elapse instantly and deterministically.

use std::time::Duration;

use rust_decimal::dec;

use octocat_supply_core::ProductId;
use octocat_supply_cart::{CartAction, CartItem, CartSession, FileStore, PricingPolicy};

fn store_in(dir: &tempfile::TempDir) -> FileStore {
    FileStore::new(dir.path().join("cart.json"))
}

fn add_widget(quantity: u32) -> CartAction {
    CartAction::AddItem {
        item: CartItem::new(ProductId::new(1), "Widget".into(), dec!(15), 1),
        quantity,
    }
}

#[tokio::test(start_paused = true)]
async fn a_flushed_cart_survives_a_new_session() {
    let dir = tempfile::tempdir().expect("temp dir");

    let mut session = CartSession::new(store_in(&dir), PricingPolicy::default());
    session.dispatch(add_widget(3));
    session.flush().await.expect("flush");
    drop(session);

    let mut restored = CartSession::new(store_in(&dir), PricingPolicy::default());
    restored.hydrate().await;

    assert_eq!(restored.state().product_quantity(ProductId::new(1)), 3);
    assert_eq!(restored.state().subtotal, dec!(45));
}

#[tokio::test(start_paused = true)]
async fn the_debounced_save_lands_without_a_flush() {
    let dir = tempfile::tempdir().expect("temp dir");

    let mut session = CartSession::new(store_in(&dir), PricingPolicy::default());
    session.dispatch(add_widget(2));

    // Past the debounce window the background save has run.
    tokio::time::sleep(Duration::from_millis(500)).await;

    let mut restored = CartSession::new(store_in(&dir), PricingPolicy::default());
    restored.hydrate().await;
    assert_eq!(restored.state().product_quantity(ProductId::new(1)), 2);
}

#[tokio::test(start_paused = true)]
async fn a_corrupt_snapshot_hydrates_to_an_empty_cart() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = store_in(&dir);
    tokio::fs::write(store.path(), b"definitely not json")
        .await
        .expect("write corrupt file");

    let mut session = CartSession::new(store.clone(), PricingPolicy::default());
    session.hydrate().await;

    assert!(!session.state().has_items());
    // The bad payload was cleared; the next hydrate starts clean.
    assert!(!store.path().exists());
}

#[tokio::test(start_paused = true)]
async fn undo_rolls_back_and_the_rollback_is_persisted() {
    let dir = tempfile::tempdir().expect("temp dir");

    let mut session = CartSession::new(store_in(&dir), PricingPolicy::default());
    session.dispatch(add_widget(1));
    session.dispatch(add_widget(4));
    assert_eq!(session.state().product_quantity(ProductId::new(1)), 5);

    assert!(session.undo());
    session.flush().await.expect("flush");

    let mut restored = CartSession::new(store_in(&dir), PricingPolicy::default());
    restored.hydrate().await;
    assert_eq!(restored.state().product_quantity(ProductId::new(1)), 1);
}

#[tokio::test(start_paused = true)]
async fn undo_is_refused_after_the_window() {
    let dir = tempfile::tempdir().expect("temp dir");

    let mut session = CartSession::new(store_in(&dir), PricingPolicy::default())
        .with_undo_window(Duration::from_secs(2));
    session.dispatch(add_widget(1));

    tokio::time::sleep(Duration::from_secs(3)).await;

    assert!(!session.can_undo());
    assert!(!session.undo());
    assert_eq!(session.state().product_quantity(ProductId::new(1)), 1);
}
