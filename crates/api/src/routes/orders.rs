//! Order CRUD handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use octocat_supply_core::{BranchId, OrderId};

use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::models::{CreateOrder, Order, UpdateOrder};
use crate::state::AppState;

/// Query-string filters for order listing.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilter {
    pub branch_id: Option<i32>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<OrderFilter>,
) -> Result<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.pool());
    let orders = match filter.branch_id {
        Some(branch_id) => repo.find_by_branch(BranchId::new(branch_id)).await?,
        None => repo.find_all().await?,
    };
    Ok(Json(orders))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrder>,
) -> Result<(StatusCode, Json<Order>)> {
    let order = OrderRepository::new(state.pool()).create(&payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn get_one(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Order>> {
    OrderRepository::new(state.pool())
        .find_by_id(OrderId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(changes): Json<UpdateOrder>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .update(OrderId::new(id), &changes)
        .await?;
    Ok(Json(order))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode> {
    OrderRepository::new(state.pool())
        .delete(OrderId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
