//! Tag endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Tag, TagRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{Paginated, Pagination, PaginationParams};

/// Create tag request
#[derive(Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
    #[serde(default)]
    pub color: String,
}

/// Tag response
#[derive(Serialize)]
pub struct TagResponse {
    pub id: i64,
    pub name: String,
    pub color: String,
}

impl From<Tag> for TagResponse {
    fn from(t: Tag) -> Self {
        Self {
            id: t.id,
            name: t.name,
            color: t.color,
        }
    }
}

/// GET /tags - list tags ordered by name
async fn list_tags(
    State(state): State<Arc<AppState>>,
    Query(page): Query<PaginationParams>,
) -> Result<Json<Paginated<TagResponse>>, ApiError> {
    let result = TagRepo::new(state.pool()).list(Pagination::from(page)).await?;
    Ok(Json(result.map(TagResponse::from)))
}

/// POST /tags - duplicate names come back as 409
async fn create_tag(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTagRequest>,
) -> Result<(StatusCode, Json<TagResponse>), ApiError> {
    let tag = TagRepo::new(state.pool()).create(&req.name, &req.color).await?;
    Ok((StatusCode::CREATED, Json(TagResponse::from(tag))))
}

/// DELETE /tags/{id} - ad links cascade
async fn delete_tag(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    TagRepo::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Tag routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tags", get(list_tags).post(create_tag))
        .route("/tags/{id}", delete(delete_tag))
}
