//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use octocat_supply_core::ProductId;

/// A single line in the cart, identified by its product.
///
/// `discount` is a fraction in `[0, 1)` applied to `unit_price`; snapshots
/// with out-of-range discounts are rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product identity. At most one line per product exists in a cart.
    pub product_id: ProductId,
    /// Display name captured at add time.
    pub name: String,
    /// Price per unit before discount.
    pub unit_price: Decimal,
    /// Positive quantity. A line never persists with quantity zero.
    pub quantity: u32,
    /// Product image file name, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_name: Option<String>,
    /// Stock-keeping unit, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Discount fraction in `[0, 1)`, e.g. `0.1` for 10% off.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Decimal>,
}

impl CartItem {
    /// Create a line item with the required fields only.
    #[must_use]
    pub const fn new(
        product_id: ProductId,
        name: String,
        unit_price: Decimal,
        quantity: u32,
    ) -> Self {
        Self {
            product_id,
            name,
            unit_price,
            quantity,
            img_name: None,
            sku: None,
            discount: None,
        }
    }

    /// Unit price with the discount fraction applied.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.discount.map_or(self.unit_price, |d| {
            self.unit_price * (Decimal::ONE - d)
        })
    }

    /// `effective_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.effective_price() * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn test_effective_price_without_discount() {
        let item = CartItem::new(ProductId::new(1), "Widget".into(), dec!(50), 1);
        assert_eq!(item.effective_price(), dec!(50));
        assert_eq!(item.line_total(), dec!(50));
    }

    #[test]
    fn test_effective_price_with_discount() {
        let mut item = CartItem::new(ProductId::new(1), "Widget".into(), dec!(100), 2);
        item.discount = Some(dec!(0.1));
        assert_eq!(item.effective_price(), dec!(90.0));
        assert_eq!(item.line_total(), dec!(180.0));
    }

    #[test]
    fn test_serde_camel_case() {
        let item = CartItem::new(ProductId::new(3), "Cable".into(), dec!(9.99), 4);
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("productId").is_some());
        assert!(json.get("unitPrice").is_some());
        // Optional fields are omitted, not null
        assert!(json.get("discount").is_none());
    }
}
