//! Delivery models: supplier deliveries and their allocation to order lines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use octocat_supply_core::{
    DeliveryId, DeliveryStatus, OrderDetailDeliveryId, OrderDetailId, SupplierId,
};

/// A delivery from a supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub delivery_id: DeliveryId,
    pub supplier_id: SupplierId,
    pub delivery_date: DateTime<Utc>,
    pub name: String,
    pub description: String,
    pub status: DeliveryStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDelivery {
    pub supplier_id: SupplierId,
    pub delivery_date: DateTime<Utc>,
    pub name: String,
    pub description: String,
    /// Defaults to `pending` when omitted.
    #[serde(default)]
    pub status: Option<DeliveryStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDelivery {
    pub supplier_id: Option<SupplierId>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<DeliveryStatus>,
}

/// How much of an order line a given delivery fulfils.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailDelivery {
    pub order_detail_delivery_id: OrderDetailDeliveryId,
    pub order_detail_id: OrderDetailId,
    pub delivery_id: DeliveryId,
    pub quantity: i32,
    pub notes: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderDetailDelivery {
    pub order_detail_id: OrderDetailId,
    pub delivery_id: DeliveryId,
    pub quantity: i32,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderDetailDelivery {
    pub order_detail_id: Option<OrderDetailId>,
    pub delivery_id: Option<DeliveryId>,
    pub quantity: Option<i32>,
    pub notes: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_status_kebab_case() {
        let json = r#"{
            "supplierId": 1,
            "deliveryDate": "2024-01-20T10:00:00Z",
            "name": "Monthly Delivery",
            "description": "Monthly supplies delivery",
            "status": "in-transit"
        }"#;
        let create: CreateDelivery = serde_json::from_str(json).unwrap();
        assert_eq!(create.status, Some(DeliveryStatus::InTransit));
    }
}
