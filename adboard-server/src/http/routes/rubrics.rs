//! Rubric endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{AdRepo, Rubric, RubricRepo, RubricWithCount};
use crate::http::error::ApiError;
use crate::http::routes::ads::AdResponse;
use crate::http::server::AppState;
use crate::models::{Paginated, Pagination, PaginationParams};

/// Create rubric request
#[derive(Deserialize)]
pub struct CreateRubricRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Rubric response
#[derive(Serialize)]
pub struct RubricResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_count: Option<i64>,
}

impl From<Rubric> for RubricResponse {
    fn from(r: Rubric) -> Self {
        Self {
            id: r.id,
            name: r.name,
            description: r.description,
            ad_count: None,
        }
    }
}

impl From<RubricWithCount> for RubricResponse {
    fn from(r: RubricWithCount) -> Self {
        Self {
            id: r.id,
            name: r.name,
            description: r.description,
            ad_count: Some(r.ad_count),
        }
    }
}

/// GET /rubrics - list rubrics with ad counts
async fn list_rubrics(
    State(state): State<Arc<AppState>>,
    Query(page): Query<PaginationParams>,
) -> Result<Json<Paginated<RubricResponse>>, ApiError> {
    let result = RubricRepo::new(state.pool())
        .list(Pagination::from(page))
        .await?;
    Ok(Json(result.map(RubricResponse::from)))
}

/// POST /rubrics
async fn create_rubric(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateRubricRequest>,
) -> Result<(StatusCode, Json<RubricResponse>), ApiError> {
    let rubric = RubricRepo::new(state.pool())
        .create(&req.name, &req.description)
        .await?;
    Ok((StatusCode::CREATED, Json(RubricResponse::from(rubric))))
}

/// GET /rubrics/{id}
async fn get_rubric(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<RubricResponse>, ApiError> {
    let rubric = RubricRepo::new(state.pool()).get(id).await?;
    Ok(Json(RubricResponse::from(rubric)))
}

/// DELETE /rubrics/{id} - 409 while ads still reference the rubric
async fn delete_rubric(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    RubricRepo::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /rubrics/{id}/ads - ads filed under a rubric, newest first
async fn list_rubric_ads(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(page): Query<PaginationParams>,
) -> Result<Json<Paginated<AdResponse>>, ApiError> {
    // 404 for a missing rubric rather than an empty list
    RubricRepo::new(state.pool()).get(id).await?;
    let result = AdRepo::new(state.pool())
        .list_by_rubric(id, Pagination::from(page))
        .await?;
    Ok(Json(result.map(AdResponse::from)))
}

/// Rubric routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rubrics", get(list_rubrics).post(create_rubric))
        .route("/rubrics/{id}", get(get_rubric).delete(delete_rubric))
        .route("/rubrics/{id}/ads", get(list_rubric_ads))
}
