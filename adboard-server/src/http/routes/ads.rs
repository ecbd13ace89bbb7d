//! Ad endpoints
//!
//! `create_ad` is the one path that runs the validation pass before
//! persisting; it sets the author from the identity header and lets the
//! database stamp `published`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Ad, AdRepo, AdTag, TagWithWeight, UserRepo};
use crate::http::error::ApiError;
use crate::http::extractors::Author;
use crate::http::server::AppState;
use crate::models::{NewAd, Paginated, Pagination, PaginationParams};

/// Query parameters for the ad list
#[derive(Debug, Default, Deserialize)]
pub struct ListAdsParams {
    /// When true, only ads with price > 0
    pub published: Option<bool>,
}

/// Ad response
#[derive(Serialize)]
pub struct AdResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub price: f64,
    pub published: String,
    pub rubric_id: Option<i64>,
    pub author_id: Option<i64>,
}

impl From<Ad> for AdResponse {
    fn from(ad: Ad) -> Self {
        Self {
            id: ad.id,
            title: ad.title,
            content: ad.content,
            price: ad.price,
            published: ad.published.to_rfc3339(),
            rubric_id: ad.rubric_id,
            author_id: ad.author_id,
        }
    }
}

/// Attach-tag request
#[derive(Deserialize)]
pub struct AttachTagRequest {
    pub tag_id: i64,
    /// Link weight, defaults to 1
    pub weight: Option<i16>,
}

/// Attach-tag response
#[derive(Serialize)]
pub struct AdTagResponse {
    pub id: i64,
    pub ad_id: i64,
    pub tag_id: i64,
    pub weight: i16,
}

impl From<AdTag> for AdTagResponse {
    fn from(link: AdTag) -> Self {
        Self {
            id: link.id,
            ad_id: link.ad_id,
            tag_id: link.tag_id,
            weight: link.weight,
        }
    }
}

/// Tag-with-weight response
#[derive(Serialize)]
pub struct AdTagsResponse {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub weight: i16,
}

impl From<TagWithWeight> for AdTagsResponse {
    fn from(t: TagWithWeight) -> Self {
        Self {
            id: t.id,
            name: t.name,
            color: t.color,
            weight: t.weight,
        }
    }
}

/// GET / and GET /ads - list ads, newest first
async fn list_ads(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListAdsParams>,
    Query(page): Query<PaginationParams>,
) -> Result<Json<Paginated<AdResponse>>, ApiError> {
    let page = Pagination::from(page);
    let repo = AdRepo::new(state.pool());

    let result = if params.published.unwrap_or(false) {
        repo.published(page).await?
    } else {
        repo.list(page).await?
    };

    Ok(Json(result.map(AdResponse::from)))
}

/// POST /ads - the creation flow: validate, then persist
async fn create_ad(
    State(state): State<Arc<AppState>>,
    Author(author): Author,
    Json(draft): Json<NewAd>,
) -> Result<(StatusCode, Json<AdResponse>), ApiError> {
    // Explicit validation pass; the repository insert will not repeat it
    draft.validate(&state.moderation)?;

    let author_id = match author {
        Some(username) => Some(UserRepo::new(state.pool()).ensure(&username).await?.id),
        None => None,
    };

    let ad = AdRepo::new(state.pool()).insert(&draft, author_id).await?;
    Ok((StatusCode::CREATED, Json(AdResponse::from(ad))))
}

/// GET /ads/{id}
async fn get_ad(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<AdResponse>, ApiError> {
    let ad = AdRepo::new(state.pool()).get(id).await?;
    Ok(Json(AdResponse::from(ad)))
}

/// DELETE /ads/{id}
async fn delete_ad(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    AdRepo::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /ads/{id}/tags - attach a tag (re-attaching updates the weight)
async fn attach_tag(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<AttachTagRequest>,
) -> Result<(StatusCode, Json<AdTagResponse>), ApiError> {
    let link = AdRepo::new(state.pool())
        .attach_tag(id, req.tag_id, req.weight)
        .await?;
    Ok((StatusCode::CREATED, Json(AdTagResponse::from(link))))
}

/// GET /ads/{id}/tags
async fn list_ad_tags(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<AdTagsResponse>>, ApiError> {
    let repo = AdRepo::new(state.pool());
    // 404 for a missing ad rather than an empty list
    repo.get(id).await?;
    let tags = repo.tags_for(id).await?;
    Ok(Json(tags.into_iter().map(AdTagsResponse::from).collect()))
}

/// Ad routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_ads))
        .route("/ads", get(list_ads).post(create_ad))
        .route("/ads/{id}", get(get_ad).delete(delete_ad))
        .route("/ads/{id}/tags", post(attach_tag).get(list_ad_tags))
}
