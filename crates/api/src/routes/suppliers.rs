//! Supplier CRUD handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use octocat_supply_core::SupplierId;

use crate::db::suppliers::SupplierRepository;
use crate::error::{AppError, Result};
use crate::models::{CreateSupplier, Supplier, UpdateSupplier};
use crate::state::AppState;

/// Query-string filters for supplier listing.
#[derive(Debug, Deserialize, Default)]
pub struct SupplierFilter {
    pub name: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<SupplierFilter>,
) -> Result<Json<Vec<Supplier>>> {
    let repo = SupplierRepository::new(state.pool());
    let suppliers = match filter.name {
        Some(ref fragment) => repo.find_by_name(fragment).await?,
        None => repo.find_all().await?,
    };
    Ok(Json(suppliers))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateSupplier>,
) -> Result<(StatusCode, Json<Supplier>)> {
    let supplier = SupplierRepository::new(state.pool())
        .create(&payload)
        .await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Supplier>> {
    SupplierRepository::new(state.pool())
        .find_by_id(SupplierId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("supplier {id}")))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(changes): Json<UpdateSupplier>,
) -> Result<Json<Supplier>> {
    let supplier = SupplierRepository::new(state.pool())
        .update(SupplierId::new(id), &changes)
        .await?;
    Ok(Json(supplier))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode> {
    SupplierRepository::new(state.pool())
        .delete(SupplierId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
