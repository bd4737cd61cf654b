//! Pricing policy configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Shipping and tax configuration applied when deriving cart totals.
///
/// There is exactly one policy per cart; call sites never hard-code
/// thresholds or fees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPolicy {
    /// Subtotal at or above which shipping is free.
    pub free_shipping_threshold: Decimal,
    /// Flat shipping fee charged below the threshold.
    pub shipping_fee: Decimal,
    /// Tax rate as a fraction of the subtotal, e.g. `0.08` for 8%.
    pub tax_rate: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Decimal::new(100, 0),
            shipping_fee: Decimal::new(10, 0),
            tax_rate: Decimal::new(8, 2),
        }
    }
}

impl PricingPolicy {
    /// Shipping charge for a cart with the given item count and subtotal.
    ///
    /// An empty cart always ships for free; shipping is strictly a function
    /// of the current items.
    #[must_use]
    pub fn shipping(&self, item_count: u32, subtotal: Decimal) -> Decimal {
        if item_count == 0 || subtotal >= self.free_shipping_threshold {
            Decimal::ZERO
        } else {
            self.shipping_fee
        }
    }

    /// Tax charged on the given subtotal.
    #[must_use]
    pub fn tax(&self, subtotal: Decimal) -> Decimal {
        subtotal * self.tax_rate
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.free_shipping_threshold, dec!(100));
        assert_eq!(policy.shipping_fee, dec!(10));
        assert_eq!(policy.tax_rate, dec!(0.08));
    }

    #[test]
    fn test_shipping_free_on_empty_cart() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.shipping(0, Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_shipping_below_threshold() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.shipping(1, dec!(50)), dec!(10));
    }

    #[test]
    fn test_shipping_at_threshold() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.shipping(1, dec!(100)), Decimal::ZERO);
    }
}
