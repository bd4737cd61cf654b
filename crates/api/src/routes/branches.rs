//! Branch CRUD handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use octocat_supply_core::{BranchId, HeadquartersId};

use crate::db::branches::BranchRepository;
use crate::error::{AppError, Result};
use crate::models::{Branch, CreateBranch, UpdateBranch};
use crate::state::AppState;

/// Query-string filters for branch listing.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BranchFilter {
    pub headquarters_id: Option<i32>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<BranchFilter>,
) -> Result<Json<Vec<Branch>>> {
    let repo = BranchRepository::new(state.pool());
    let branches = match filter.headquarters_id {
        Some(headquarters_id) => {
            repo.find_by_headquarters(HeadquartersId::new(headquarters_id))
                .await?
        }
        None => repo.find_all().await?,
    };
    Ok(Json(branches))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateBranch>,
) -> Result<(StatusCode, Json<Branch>)> {
    let branch = BranchRepository::new(state.pool()).create(&payload).await?;
    Ok((StatusCode::CREATED, Json(branch)))
}

pub async fn get_one(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Branch>> {
    BranchRepository::new(state.pool())
        .find_by_id(BranchId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("branch {id}")))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(changes): Json<UpdateBranch>,
) -> Result<Json<Branch>> {
    let branch = BranchRepository::new(state.pool())
        .update(BranchId::new(id), &changes)
        .await?;
    Ok(Json(branch))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode> {
    BranchRepository::new(state.pool())
        .delete(BranchId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
