//! Server-side cart handlers.
//!
//! Carts are anonymous, keyed by uuid. Clients create one, keep the id, and
//! replay local mutations against it; the unique `(cart, product)` line
//! constraint makes repeated adds merge instead of duplicating.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use octocat_supply_core::ProductId;

use crate::db::carts::CartRepository;
use crate::error::{AppError, Result};
use crate::models::{AddCartItem, Cart, CartLine, CartWithItems, SetCartItemQuantity};
use crate::state::AppState;

pub async fn create(State(state): State<AppState>) -> Result<(StatusCode, Json<Cart>)> {
    let cart = CartRepository::new(state.pool()).create().await?;
    Ok((StatusCode::CREATED, Json(cart)))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CartWithItems>> {
    CartRepository::new(state.pool())
        .find(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("cart {id}")))
}

pub async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddCartItem>,
) -> Result<(StatusCode, Json<CartLine>)> {
    if payload.quantity <= 0 {
        return Err(AppError::Validation("quantity must be positive".to_string()));
    }
    let line = CartRepository::new(state.pool())
        .add_item(id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(line)))
}

pub async fn set_quantity(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(Uuid, i32)>,
    Json(payload): Json<SetCartItemQuantity>,
) -> Result<StatusCode> {
    CartRepository::new(state.pool())
        .set_quantity(id, ProductId::new(product_id), payload.quantity)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_item(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(Uuid, i32)>,
) -> Result<StatusCode> {
    CartRepository::new(state.pool())
        .remove_item(id, ProductId::new(product_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    CartRepository::new(state.pool()).clear(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
