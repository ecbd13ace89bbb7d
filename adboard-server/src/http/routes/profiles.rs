//! User profile endpoints
//!
//! The phone update runs the phone validator explicitly before the write,
//! mirroring the ad-creation flow.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Profile, ProfileRepo, UserRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::validate_phone;

/// Profile update request
#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub phone: String,
}

/// Profile response
#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub user_id: i64,
    pub phone: String,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            phone: p.phone,
        }
    }
}

/// GET /users/{username}/profile
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = ProfileRepo::new(state.pool()).get(&username).await?;
    Ok(Json(ProfileResponse::from(profile)))
}

/// PUT /users/{username}/profile - create or update the one profile
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    validate_phone(&req.phone)?;

    let user = UserRepo::new(state.pool()).ensure(&username).await?;
    let profile = ProfileRepo::new(state.pool())
        .set_phone(user.id, &req.phone)
        .await?;
    Ok(Json(ProfileResponse::from(profile)))
}

/// DELETE /users/{username} - profile and authored ads cascade
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<StatusCode, ApiError> {
    UserRepo::new(state.pool()).delete(&username).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Profile routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/users/{username}/profile",
            get(get_profile).put(update_profile),
        )
        .route("/users/{username}", delete(delete_user))
}
