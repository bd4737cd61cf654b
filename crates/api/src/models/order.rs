//! Order models: orders placed by branches and their line items.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use octocat_supply_core::{BranchId, OrderDetailId, OrderId, OrderStatus, ProductId};

/// An order placed by a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    pub branch_id: BranchId,
    pub order_date: DateTime<Utc>,
    pub name: String,
    pub description: String,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    pub branch_id: BranchId,
    pub order_date: DateTime<Utc>,
    pub name: String,
    pub description: String,
    /// Defaults to `pending` when omitted.
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrder {
    pub branch_id: Option<BranchId>,
    pub order_date: Option<DateTime<Utc>>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<OrderStatus>,
}

/// A line item on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub order_detail_id: OrderDetailId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub notes: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderDetail {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: Decimal,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderDetail {
    pub order_id: Option<OrderId>,
    pub product_id: Option<ProductId>,
    pub quantity: Option<i32>,
    pub unit_price: Option<Decimal>,
    pub notes: Option<String>,
}
