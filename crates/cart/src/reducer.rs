//! Pure cart transitions.
//!
//! `apply` is a pure function of `(state, action)`; persistence and network
//! effects live in [`crate::session`] and [`crate::remote`].

use octocat_supply_core::ProductId;

use crate::item::CartItem;
use crate::policy::PricingPolicy;
use crate::snapshot::CartSnapshot;
use crate::state::CartState;

/// A cart transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add `quantity` of an item. Merges into an existing line for the same
    /// product; a zero quantity is a no-op.
    AddItem {
        /// The item to add; its own `quantity` field is ignored.
        item: CartItem,
        /// How many units to add.
        quantity: u32,
    },
    /// Remove the line for a product. Idempotent.
    RemoveItem {
        /// Product whose line is removed.
        product_id: ProductId,
    },
    /// Set a line's quantity exactly. Zero removes the line; an unknown
    /// product is a no-op.
    UpdateQuantity {
        /// Product whose line is updated.
        product_id: ProductId,
        /// New exact quantity.
        quantity: u32,
    },
    /// Empty the cart.
    Clear,
    /// Replace the whole state from a validated snapshot.
    Hydrate(CartSnapshot),
}

/// Apply a transition, returning the next state with totals recomputed.
#[must_use]
pub fn apply(state: &CartState, action: CartAction, policy: &PricingPolicy) -> CartState {
    let items = match action {
        CartAction::AddItem { item, quantity } => {
            if quantity == 0 {
                return state.clone();
            }
            let mut items = state.items.clone();
            if let Some(existing) = items
                .iter_mut()
                .find(|line| line.product_id == item.product_id)
            {
                existing.quantity += quantity;
            } else {
                items.push(CartItem { quantity, ..item });
            }
            items
        }
        CartAction::RemoveItem { product_id } => state
            .items
            .iter()
            .filter(|line| line.product_id != product_id)
            .cloned()
            .collect(),
        CartAction::UpdateQuantity {
            product_id,
            quantity,
        } => {
            if quantity == 0 {
                return apply(state, CartAction::RemoveItem { product_id }, policy);
            }
            let mut items = state.items.clone();
            if let Some(line) = items.iter_mut().find(|line| line.product_id == product_id) {
                line.quantity = quantity;
            }
            items
        }
        CartAction::Clear => Vec::new(),
        CartAction::Hydrate(snapshot) => snapshot.items,
    };

    CartState::from_items(items, policy)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::{Decimal, dec};

    use super::*;

    fn product(id: i32, price: Decimal) -> CartItem {
        CartItem::new(ProductId::new(id), format!("Product {id}"), price, 1)
    }

    fn add(state: &CartState, item: CartItem, quantity: u32) -> CartState {
        apply(
            state,
            CartAction::AddItem { item, quantity },
            &PricingPolicy::default(),
        )
    }

    #[test]
    fn test_add_item_to_empty_cart() {
        let mut item = product(1, dec!(100));
        item.discount = Some(dec!(0.1));

        let state = add(&CartState::empty(), item, 2);

        assert_eq!(state.items.len(), 1);
        assert_eq!(state.item_count, 2);
        // $100 * 0.9 * 2
        assert_eq!(state.subtotal, dec!(180.00));
        // subtotal >= threshold(100), so free shipping
        assert_eq!(state.shipping, Decimal::ZERO);
        assert_eq!(state.tax, dec!(14.4000));
        assert_eq!(state.total, dec!(194.40));
    }

    #[test]
    fn test_add_same_product_merges_quantities() {
        let state = add(&CartState::empty(), product(1, dec!(10)), 1);
        let state = add(&state, product(1, dec!(10)), 2);

        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items.first().unwrap().quantity, 3);
        assert_eq!(state.item_count, 3);
    }

    #[test]
    fn test_add_zero_quantity_is_noop() {
        let state = add(&CartState::empty(), product(1, dec!(10)), 0);
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_remove_item() {
        let policy = PricingPolicy::default();
        let state = add(&CartState::empty(), product(1, dec!(10)), 2);
        let state = apply(
            &state,
            CartAction::RemoveItem {
                product_id: ProductId::new(1),
            },
            &policy,
        );

        assert!(state.items.is_empty());
        assert_eq!(state.item_count, 0);
        assert_eq!(state.subtotal, Decimal::ZERO);
    }

    #[test]
    fn test_remove_absent_item_is_idempotent() {
        let policy = PricingPolicy::default();
        let state = add(&CartState::empty(), product(1, dec!(10)), 2);
        let next = apply(
            &state,
            CartAction::RemoveItem {
                product_id: ProductId::new(99),
            },
            &policy,
        );
        assert_eq!(next, state);
    }

    #[test]
    fn test_update_quantity_sets_exactly() {
        let policy = PricingPolicy::default();
        let state = add(&CartState::empty(), product(1, dec!(10)), 5);
        let state = apply(
            &state,
            CartAction::UpdateQuantity {
                product_id: ProductId::new(1),
                quantity: 2,
            },
            &policy,
        );
        assert_eq!(state.product_quantity(ProductId::new(1)), 2);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let policy = PricingPolicy::default();
        let state = add(&CartState::empty(), product(1, dec!(10)), 5);
        let state = apply(
            &state,
            CartAction::UpdateQuantity {
                product_id: ProductId::new(1),
                quantity: 0,
            },
            &policy,
        );
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_update_quantity_unknown_product_is_noop() {
        let policy = PricingPolicy::default();
        let state = add(&CartState::empty(), product(1, dec!(10)), 5);
        let next = apply(
            &state,
            CartAction::UpdateQuantity {
                product_id: ProductId::new(2),
                quantity: 3,
            },
            &policy,
        );
        assert_eq!(next, state);
    }

    #[test]
    fn test_clear_zeroes_everything() {
        let policy = PricingPolicy::default();
        let state = add(&CartState::empty(), product(1, dec!(10)), 5);
        let state = apply(&state, CartAction::Clear, &policy);

        assert_eq!(state.item_count, 0);
        assert_eq!(state.subtotal, Decimal::ZERO);
        // Shipping is strictly a function of items: an empty cart ships free.
        assert_eq!(state.shipping, Decimal::ZERO);
        assert_eq!(state.total, Decimal::ZERO);
    }

    #[test]
    fn test_shipping_charged_below_threshold() {
        let state = add(&CartState::empty(), product(1, dec!(50)), 1);

        assert_eq!(state.subtotal, dec!(50));
        assert_eq!(state.shipping, dec!(10));
        assert_eq!(state.tax, dec!(4.00));
        assert_eq!(state.total, dec!(64.00));
    }

    #[test]
    fn test_item_count_matches_quantity_sum() {
        let policy = PricingPolicy::default();
        let mut state = CartState::empty();
        for (id, quantity) in [(1, 2), (2, 3), (1, 4), (3, 1)] {
            state = apply(
                &state,
                CartAction::AddItem {
                    item: product(id, dec!(5)),
                    quantity,
                },
                &policy,
            );
        }

        let quantity_sum: u32 = state.items.iter().map(|line| line.quantity).sum();
        assert_eq!(state.item_count, quantity_sum);
        assert_eq!(state.item_count, 10);

        // No two lines share a product identity.
        let mut ids: Vec<_> = state.items.iter().map(|line| line.product_id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), state.items.len());
    }

    #[test]
    fn test_hydrate_replaces_state() {
        let policy = PricingPolicy::default();
        let state = add(&CartState::empty(), product(1, dec!(10)), 1);
        let snapshot = CartSnapshot {
            items: vec![product(2, dec!(20))],
        };
        let state = apply(&state, CartAction::Hydrate(snapshot), &policy);

        assert_eq!(state.items.len(), 1);
        assert!(state.is_in_cart(ProductId::new(2)));
        assert!(!state.is_in_cart(ProductId::new(1)));
    }
}
