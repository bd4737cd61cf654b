//! End-to-end cart arithmetic through the reducer and pricing policy.
//!
//! Worked examples under the default policy: free shipping at a subtotal of
//! 100, a flat fee of 10 below it, and 8% tax on the subtotal.

use rust_decimal::dec;

use octocat_supply_core::ProductId;
use octocat_supply_cart::{CartAction, CartItem, CartState, PricingPolicy, apply};

fn robo_arm() -> CartItem {
    CartItem::new(ProductId::new(1), "Robo-Arm MK4".into(), dec!(30), 1)
}

fn gripper() -> CartItem {
    CartItem {
        discount: Some(dec!(0.2)),
        ..CartItem::new(ProductId::new(2), "Gripper Claw".into(), dec!(25), 1)
    }
}

#[test]
fn totals_follow_a_shopping_session() {
    let policy = PricingPolicy::default();
    let state = CartState::empty();

    // Two arms at 30 and one discounted gripper at 25 * 0.8 = 20.
    let state = apply(
        &state,
        CartAction::AddItem {
            item: robo_arm(),
            quantity: 2,
        },
        &policy,
    );
    let state = apply(
        &state,
        CartAction::AddItem {
            item: gripper(),
            quantity: 1,
        },
        &policy,
    );

    assert_eq!(state.item_count, 3);
    assert_eq!(state.subtotal, dec!(80));
    assert_eq!(state.shipping, dec!(10));
    assert_eq!(state.tax, dec!(6.40));
    assert_eq!(state.total, dec!(96.40));

    // Four arms push the subtotal to 140 and past the free shipping bar.
    let state = apply(
        &state,
        CartAction::UpdateQuantity {
            product_id: ProductId::new(1),
            quantity: 4,
        },
        &policy,
    );

    assert_eq!(state.subtotal, dec!(140));
    assert_eq!(state.shipping, dec!(0));
    assert_eq!(state.tax, dec!(11.20));
    assert_eq!(state.total, dec!(151.20));

    // Dropping the gripper keeps the cart over the threshold.
    let state = apply(
        &state,
        CartAction::RemoveItem {
            product_id: ProductId::new(2),
        },
        &policy,
    );

    assert_eq!(state.items.len(), 1);
    assert_eq!(state.subtotal, dec!(120));
    assert_eq!(state.shipping, dec!(0));
    assert_eq!(state.total, dec!(129.60));

    // Clearing zeroes everything, shipping included.
    let state = apply(&state, CartAction::Clear, &policy);
    assert_eq!(state.item_count, 0);
    assert_eq!(state.total, dec!(0));
    assert_eq!(state.shipping, dec!(0));
}

#[test]
fn adding_the_same_product_merges_into_one_line() {
    let policy = PricingPolicy::default();
    let state = CartState::empty();

    let state = apply(
        &state,
        CartAction::AddItem {
            item: robo_arm(),
            quantity: 1,
        },
        &policy,
    );
    let state = apply(
        &state,
        CartAction::AddItem {
            item: robo_arm(),
            quantity: 2,
        },
        &policy,
    );

    assert_eq!(state.items.len(), 1);
    assert_eq!(state.product_quantity(ProductId::new(1)), 3);
}

#[test]
fn setting_quantity_to_zero_removes_the_line() {
    let policy = PricingPolicy::default();
    let state = apply(
        &CartState::empty(),
        CartAction::AddItem {
            item: robo_arm(),
            quantity: 2,
        },
        &policy,
    );

    let state = apply(
        &state,
        CartAction::UpdateQuantity {
            product_id: ProductId::new(1),
            quantity: 0,
        },
        &policy,
    );

    assert!(state.items.is_empty());
    assert_eq!(state.total, dec!(0));
}

#[test]
fn updating_an_unknown_product_is_a_no_op() {
    let policy = PricingPolicy::default();
    let state = apply(
        &CartState::empty(),
        CartAction::AddItem {
            item: robo_arm(),
            quantity: 1,
        },
        &policy,
    );

    let next = apply(
        &state,
        CartAction::UpdateQuantity {
            product_id: ProductId::new(99),
            quantity: 5,
        },
        &policy,
    );

    assert_eq!(next, state);
}

#[test]
fn an_exact_threshold_subtotal_ships_free() {
    let policy = PricingPolicy::default();
    let item = CartItem::new(ProductId::new(3), "Sensor".into(), dec!(50), 1);

    let state = apply(
        &CartState::empty(),
        CartAction::AddItem { item, quantity: 2 },
        &policy,
    );

    assert_eq!(state.subtotal, dec!(100));
    assert_eq!(state.shipping, dec!(0));
}
