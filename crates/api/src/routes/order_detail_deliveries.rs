//! Order-detail-delivery CRUD handlers.
//!
//! These rows link a delivery to the order details it fulfils, carrying the
//! quantity covered by that delivery.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use octocat_supply_core::{DeliveryId, OrderDetailDeliveryId};

use crate::db::order_detail_deliveries::OrderDetailDeliveryRepository;
use crate::error::{AppError, Result};
use crate::models::{CreateOrderDetailDelivery, OrderDetailDelivery, UpdateOrderDetailDelivery};
use crate::state::AppState;

/// Query-string filters for the listing.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailDeliveryFilter {
    pub delivery_id: Option<i32>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<OrderDetailDeliveryFilter>,
) -> Result<Json<Vec<OrderDetailDelivery>>> {
    let repo = OrderDetailDeliveryRepository::new(state.pool());
    let links = match filter.delivery_id {
        Some(delivery_id) => repo.find_by_delivery(DeliveryId::new(delivery_id)).await?,
        None => repo.find_all().await?,
    };
    Ok(Json(links))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderDetailDelivery>,
) -> Result<(StatusCode, Json<OrderDetailDelivery>)> {
    if payload.quantity <= 0 {
        return Err(AppError::Validation("quantity must be positive".to_string()));
    }
    let link = OrderDetailDeliveryRepository::new(state.pool())
        .create(&payload)
        .await?;
    Ok((StatusCode::CREATED, Json(link)))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OrderDetailDelivery>> {
    OrderDetailDeliveryRepository::new(state.pool())
        .find_by_id(OrderDetailDeliveryId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("order detail delivery {id}")))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(changes): Json<UpdateOrderDetailDelivery>,
) -> Result<Json<OrderDetailDelivery>> {
    if changes.quantity.is_some_and(|q| q <= 0) {
        return Err(AppError::Validation("quantity must be positive".to_string()));
    }
    let link = OrderDetailDeliveryRepository::new(state.pool())
        .update(OrderDetailDeliveryId::new(id), &changes)
        .await?;
    Ok(Json(link))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode> {
    OrderDetailDeliveryRepository::new(state.pool())
        .delete(OrderDetailDeliveryId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
