//! Cart state with derived totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use octocat_supply_core::ProductId;

use crate::item::CartItem;
use crate::policy::PricingPolicy;

/// The cart: an ordered collection of line items plus derived totals.
///
/// Insertion order of `items` is preserved for display. The derived fields
/// are recomputed from `items` on every transition via [`recompute`] and are
/// never mutated independently.
///
/// [`recompute`]: CartState::recompute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    /// Line items, one per product.
    pub items: Vec<CartItem>,
    /// Sum of line quantities.
    pub item_count: u32,
    /// Sum of discounted line totals.
    pub subtotal: Decimal,
    /// Shipping charge per the pricing policy.
    pub shipping: Decimal,
    /// Tax on the subtotal per the pricing policy.
    pub tax: Decimal,
    /// `subtotal + shipping + tax`.
    pub total: Decimal,
}

impl CartState {
    /// The empty cart with zeroed totals.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a state from items, deriving all totals under `policy`.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>, policy: &PricingPolicy) -> Self {
        let mut state = Self {
            items,
            ..Self::default()
        };
        state.recompute(policy);
        state
    }

    /// Recompute every derived field from `items`.
    pub fn recompute(&mut self, policy: &PricingPolicy) {
        self.item_count = self.items.iter().map(|item| item.quantity).sum();
        self.subtotal = self.items.iter().map(CartItem::line_total).sum();
        self.shipping = policy.shipping(self.item_count, self.subtotal);
        self.tax = policy.tax(self.subtotal);
        self.total = self.subtotal + self.shipping + self.tax;
    }

    /// Whether the given product has a line in the cart.
    #[must_use]
    pub fn is_in_cart(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|item| item.product_id == product_id)
    }

    /// Quantity of the given product in the cart, zero if absent.
    #[must_use]
    pub fn product_quantity(&self, product_id: ProductId) -> u32 {
        self.line(product_id).map_or(0, |item| item.quantity)
    }

    /// The line item for the given product, if present.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    /// Whether the cart has any items.
    #[must_use]
    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    fn item(id: i32, price: Decimal, quantity: u32) -> CartItem {
        CartItem::new(ProductId::new(id), format!("Product {id}"), price, quantity)
    }

    #[test]
    fn test_empty_state_zeroed() {
        let state = CartState::empty();
        assert_eq!(state.item_count, 0);
        assert_eq!(state.subtotal, Decimal::ZERO);
        assert_eq!(state.shipping, Decimal::ZERO);
        assert_eq!(state.total, Decimal::ZERO);
    }

    #[test]
    fn test_from_items_derives_totals() {
        let policy = PricingPolicy::default();
        let state = CartState::from_items(vec![item(1, dec!(50), 1)], &policy);
        assert_eq!(state.item_count, 1);
        assert_eq!(state.subtotal, dec!(50));
        assert_eq!(state.shipping, dec!(10));
        assert_eq!(state.tax, dec!(4.00));
        assert_eq!(state.total, dec!(64.00));
    }

    #[test]
    fn test_lookup_helpers() {
        let policy = PricingPolicy::default();
        let state = CartState::from_items(vec![item(1, dec!(5), 3)], &policy);
        assert!(state.is_in_cart(ProductId::new(1)));
        assert!(!state.is_in_cart(ProductId::new(2)));
        assert_eq!(state.product_quantity(ProductId::new(1)), 3);
        assert_eq!(state.product_quantity(ProductId::new(2)), 0);
        assert!(state.has_items());
        assert_eq!(state.line(ProductId::new(1)).unwrap().quantity, 3);
    }
}
