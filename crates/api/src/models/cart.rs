//! Server-backed cart models.
//!
//! Carts are uuid-keyed and anonymous; the client keeps the cart id across
//! sessions. Lines are unique per `(cart_id, product_id)`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use octocat_supply_core::{CartItemId, ProductId};

/// A cart header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub cart_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A single line in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub cart_item_id: CartItemId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// A cart with its lines, as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartWithItems {
    pub cart_id: Uuid,
    pub items: Vec<CartLine>,
}

/// Payload for adding quantity of a product to a cart.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItem {
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Payload for setting a line's quantity exactly.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCartItemQuantity {
    pub quantity: i32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn test_cart_with_items_wire_format() {
        let cart = CartWithItems {
            cart_id: Uuid::nil(),
            items: vec![CartLine {
                cart_item_id: CartItemId::new(1),
                product_id: ProductId::new(2),
                quantity: 3,
                unit_price: dec!(9.99),
            }],
        };

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json["items"][0]["cartItemId"], 1);
        assert_eq!(json["items"][0]["productId"], 2);
        assert_eq!(json["items"][0]["unitPrice"], "9.99");
    }
}
