//! Product models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use octocat_supply_core::{ProductId, SupplierId};

/// A product offered by a supplier.
///
/// `discount` is a fraction in `[0, 1)`; `None` means no discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: ProductId,
    pub supplier_id: SupplierId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub sku: String,
    pub unit: String,
    pub img_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<Decimal>,
}

/// Payload for creating a product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub supplier_id: SupplierId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub sku: String,
    pub unit: String,
    pub img_name: String,
    pub discount: Option<Decimal>,
}

/// Payload for partially updating a product. Absent fields are kept.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    pub supplier_id: Option<SupplierId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub sku: Option<String>,
    pub unit: Option<String>,
    pub img_name: Option<String>,
    pub discount: Option<Decimal>,
}

/// Reject out-of-range prices and discounts before they reach the database.
pub(crate) fn validate_pricing(
    price: Option<Decimal>,
    discount: Option<Decimal>,
) -> Result<(), String> {
    if let Some(price) = price
        && price < Decimal::ZERO
    {
        return Err("price must not be negative".to_string());
    }
    if let Some(discount) = discount
        && !(Decimal::ZERO..Decimal::ONE).contains(&discount)
    {
        return Err("discount must be a fraction in [0, 1)".to_string());
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn test_product_wire_format() {
        let json = r#"{
            "supplierId": 1,
            "name": "Test Product",
            "description": "Test description",
            "price": "99.99",
            "sku": "TEST-001",
            "unit": "each",
            "imgName": "test.jpg",
            "discount": "0.15"
        }"#;
        let create: CreateProduct = serde_json::from_str(json).unwrap();
        assert_eq!(create.supplier_id, SupplierId::new(1));
        assert_eq!(create.price, dec!(99.99));
        assert_eq!(create.discount, Some(dec!(0.15)));
    }

    #[test]
    fn test_discount_is_optional() {
        let json = r#"{
            "supplierId": 1,
            "name": "Plain",
            "description": "No discount",
            "price": "10",
            "sku": "PLAIN-1",
            "unit": "each",
            "imgName": "plain.jpg"
        }"#;
        let create: CreateProduct = serde_json::from_str(json).unwrap();
        assert!(create.discount.is_none());
    }

    #[test]
    fn test_validate_pricing() {
        assert!(validate_pricing(Some(dec!(10)), Some(dec!(0.5))).is_ok());
        assert!(validate_pricing(Some(dec!(-1)), None).is_err());
        assert!(validate_pricing(None, Some(dec!(1))).is_err());
        assert!(validate_pricing(None, Some(dec!(-0.1))).is_err());
    }
}
