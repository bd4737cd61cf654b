//! Product CRUD handlers.
//!
//! Create and update both run the pricing checks: price must be non-negative
//! and discount, when present, a fraction in `[0, 1)`.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use octocat_supply_core::{ProductId, SupplierId};

use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::{CreateProduct, Product, UpdateProduct, product::validate_pricing};
use crate::state::AppState;

/// Query-string filters for product listing.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    pub supplier_id: Option<i32>,
    pub name: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.pool());
    let products = match (filter.supplier_id, filter.name) {
        (Some(supplier_id), _) => repo.find_by_supplier(SupplierId::new(supplier_id)).await?,
        (None, Some(ref fragment)) => repo.find_by_name(fragment).await?,
        (None, None) => repo.find_all().await?,
    };
    Ok(Json(products))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    validate_pricing(Some(payload.price), payload.discount).map_err(AppError::Validation)?;
    let product = ProductRepository::new(state.pool()).create(&payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn get_one(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Product>> {
    ProductRepository::new(state.pool())
        .find_by_id(ProductId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(changes): Json<UpdateProduct>,
) -> Result<Json<Product>> {
    validate_pricing(changes.price, changes.discount).map_err(AppError::Validation)?;
    let product = ProductRepository::new(state.pool())
        .update(ProductId::new(id), &changes)
        .await?;
    Ok(Json(product))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode> {
    ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
