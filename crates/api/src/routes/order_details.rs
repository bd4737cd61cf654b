//! Order detail CRUD handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use octocat_supply_core::{OrderDetailId, OrderId};

use crate::db::order_details::OrderDetailRepository;
use crate::error::{AppError, Result};
use crate::models::{CreateOrderDetail, OrderDetail, UpdateOrderDetail};
use crate::state::AppState;

/// Query-string filters for order detail listing.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailFilter {
    pub order_id: Option<i32>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<OrderDetailFilter>,
) -> Result<Json<Vec<OrderDetail>>> {
    let repo = OrderDetailRepository::new(state.pool());
    let details = match filter.order_id {
        Some(order_id) => repo.find_by_order(OrderId::new(order_id)).await?,
        None => repo.find_all().await?,
    };
    Ok(Json(details))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderDetail>,
) -> Result<(StatusCode, Json<OrderDetail>)> {
    if payload.quantity <= 0 {
        return Err(AppError::Validation("quantity must be positive".to_string()));
    }
    let detail = OrderDetailRepository::new(state.pool())
        .create(&payload)
        .await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OrderDetail>> {
    OrderDetailRepository::new(state.pool())
        .find_by_id(OrderDetailId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("order detail {id}")))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(changes): Json<UpdateOrderDetail>,
) -> Result<Json<OrderDetail>> {
    if changes.quantity.is_some_and(|q| q <= 0) {
        return Err(AppError::Validation("quantity must be positive".to_string()));
    }
    let detail = OrderDetailRepository::new(state.pool())
        .update(OrderDetailId::new(id), &changes)
        .await?;
    Ok(Json(detail))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode> {
    OrderDetailRepository::new(state.pool())
        .delete(OrderDetailId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
