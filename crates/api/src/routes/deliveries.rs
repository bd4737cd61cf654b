//! Delivery CRUD handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use octocat_supply_core::{DeliveryId, SupplierId};

use crate::db::deliveries::DeliveryRepository;
use crate::error::{AppError, Result};
use crate::models::{CreateDelivery, Delivery, UpdateDelivery};
use crate::state::AppState;

/// Query-string filters for delivery listing.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryFilter {
    pub supplier_id: Option<i32>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<DeliveryFilter>,
) -> Result<Json<Vec<Delivery>>> {
    let repo = DeliveryRepository::new(state.pool());
    let deliveries = match filter.supplier_id {
        Some(supplier_id) => repo.find_by_supplier(SupplierId::new(supplier_id)).await?,
        None => repo.find_all().await?,
    };
    Ok(Json(deliveries))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateDelivery>,
) -> Result<(StatusCode, Json<Delivery>)> {
    let delivery = DeliveryRepository::new(state.pool())
        .create(&payload)
        .await?;
    Ok((StatusCode::CREATED, Json(delivery)))
}

pub async fn get_one(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Delivery>> {
    DeliveryRepository::new(state.pool())
        .find_by_id(DeliveryId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("delivery {id}")))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(changes): Json<UpdateDelivery>,
) -> Result<Json<Delivery>> {
    let delivery = DeliveryRepository::new(state.pool())
        .update(DeliveryId::new(id), &changes)
        .await?;
    Ok(Json(delivery))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode> {
    DeliveryRepository::new(state.pool())
        .delete(DeliveryId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
