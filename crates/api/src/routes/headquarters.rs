//! Headquarters CRUD handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use octocat_supply_core::HeadquartersId;

use crate::db::headquarters::HeadquartersRepository;
use crate::error::{AppError, Result};
use crate::models::{CreateHeadquarters, Headquarters, UpdateHeadquarters};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Headquarters>>> {
    let headquarters = HeadquartersRepository::new(state.pool()).find_all().await?;
    Ok(Json(headquarters))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateHeadquarters>,
) -> Result<(StatusCode, Json<Headquarters>)> {
    let headquarters = HeadquartersRepository::new(state.pool())
        .create(&payload)
        .await?;
    Ok((StatusCode::CREATED, Json(headquarters)))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Headquarters>> {
    HeadquartersRepository::new(state.pool())
        .find_by_id(HeadquartersId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("headquarters {id}")))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(changes): Json<UpdateHeadquarters>,
) -> Result<Json<Headquarters>> {
    let headquarters = HeadquartersRepository::new(state.pool())
        .update(HeadquartersId::new(id), &changes)
        .await?;
    Ok(Json(headquarters))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode> {
    HeadquartersRepository::new(state.pool())
        .delete(HeadquartersId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
