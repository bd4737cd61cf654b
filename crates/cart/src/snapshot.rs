//! Persisted cart snapshots.
//!
//! All persistence strategies share one envelope: `{ "items": [...] }`.
//! Snapshots loaded from storage are untrusted and go through [`CartSnapshot::validate`]
//! before hydrating a cart; a corrupt snapshot degrades to the empty cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::item::CartItem;
use crate::state::CartState;

/// The persisted cart envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CartSnapshot {
    /// Line items in display order.
    pub items: Vec<CartItem>,
}

impl CartSnapshot {
    /// Snapshot the items of a live cart state.
    #[must_use]
    pub fn of(state: &CartState) -> Self {
        Self {
            items: state.items.clone(),
        }
    }

    /// Parse and validate a snapshot from its JSON encoding.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error when the payload is not a
    /// well-formed envelope. Individually malformed lines are dropped, not
    /// errors; see [`CartSnapshot::validate`].
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let snapshot: Self = serde_json::from_str(json)?;
        Ok(snapshot.validate())
    }

    /// Serialize the snapshot to its JSON encoding.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error. Does not occur for
    /// well-formed snapshots.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Drop malformed lines and deduplicate by product identity.
    ///
    /// A line is kept when its quantity is positive, its name is non-empty,
    /// its unit price is non-negative, and its discount (if any) is a
    /// fraction in `[0, 1)`. The first line wins when a product id repeats.
    #[must_use]
    pub fn validate(self) -> Self {
        let mut items: Vec<CartItem> = Vec::with_capacity(self.items.len());
        for item in self.items {
            if !is_valid_line(&item) {
                tracing::warn!(
                    product_id = %item.product_id,
                    "dropping malformed cart line from snapshot"
                );
                continue;
            }
            if items.iter().any(|kept| kept.product_id == item.product_id) {
                tracing::warn!(
                    product_id = %item.product_id,
                    "dropping duplicate cart line from snapshot"
                );
                continue;
            }
            items.push(item);
        }
        Self { items }
    }
}

fn is_valid_line(item: &CartItem) -> bool {
    item.quantity > 0
        && !item.name.is_empty()
        && item.unit_price >= Decimal::ZERO
        && item
            .discount
            .is_none_or(|d| d >= Decimal::ZERO && d < Decimal::ONE)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use octocat_supply_core::ProductId;
    use rust_decimal::dec;

    use crate::policy::PricingPolicy;

    use super::*;

    fn item(id: i32, quantity: u32) -> CartItem {
        CartItem::new(ProductId::new(id), format!("Product {id}"), dec!(10), quantity)
    }

    #[test]
    fn test_round_trip_preserves_state() {
        let policy = PricingPolicy::default();
        let state = CartState::from_items(vec![item(1, 2), item(2, 1)], &policy);

        let json = CartSnapshot::of(&state).to_json().unwrap();
        let snapshot = CartSnapshot::from_json(&json).unwrap();
        let rebuilt = CartState::from_items(snapshot.items, &policy);

        assert_eq!(rebuilt, state);
    }

    #[test]
    fn test_malformed_payload_is_an_error() {
        assert!(CartSnapshot::from_json("not json").is_err());
        assert!(CartSnapshot::from_json("{\"items\": 3}").is_err());
    }

    #[test]
    fn test_validate_drops_zero_quantity_lines() {
        let snapshot = CartSnapshot {
            items: vec![item(1, 0), item(2, 1)],
        }
        .validate();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items.first().unwrap().product_id, ProductId::new(2));
    }

    #[test]
    fn test_validate_drops_out_of_range_discount() {
        let mut bad = item(1, 1);
        bad.discount = Some(dec!(1.5));
        let snapshot = CartSnapshot {
            items: vec![bad, item(2, 1)],
        }
        .validate();
        assert_eq!(snapshot.items.len(), 1);
    }

    #[test]
    fn test_validate_deduplicates_by_product_first_wins() {
        let snapshot = CartSnapshot {
            items: vec![item(1, 2), item(1, 5)],
        }
        .validate();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items.first().unwrap().quantity, 2);
    }

    #[test]
    fn test_validate_drops_empty_name() {
        let mut bad = item(1, 1);
        bad.name = String::new();
        let snapshot = CartSnapshot { items: vec![bad] }.validate();
        assert!(snapshot.items.is_empty());
    }
}
