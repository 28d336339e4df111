//! Profile video endpoints. A profile embeds at most one video.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use domain::models::{UpsertVideoRequest, Video};
use persistence::repositories::{ProfileRepository, VideoRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::routes::MessageResponse;

#[derive(Debug, Deserialize)]
pub struct VideoListQuery {
    pub profile: Uuid,
}

fn map_video_conflict(err: sqlx::Error) -> ApiError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            ApiError::field("profile", "This profile already has a video")
        }
        _ => ApiError::from(err),
    }
}

async fn owned_profile(
    state: &AppState,
    profile_id: Uuid,
    user_id: Uuid,
) -> Result<Uuid, ApiError> {
    ProfileRepository::new(state.pool.clone())
        .find_by_id_for_user(profile_id, user_id)
        .await?
        .map(|profile| profile.id)
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))
}

/// POST /api/v1/videos
pub async fn create_video(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<UpsertVideoRequest>,
) -> Result<(StatusCode, Json<Video>), ApiError> {
    request.validate()?;

    let profile_id = owned_profile(&state, request.profile, auth.user_id).await?;

    let video = VideoRepository::new(state.pool.clone())
        .create(
            profile_id,
            request.video_source,
            &request.video_url,
            &request.video_description,
        )
        .await
        .map_err(map_video_conflict)?;

    Ok((StatusCode::CREATED, Json(video.into())))
}

/// GET /api/v1/videos?profile=…
pub async fn get_video(
    State(state): State<AppState>,
    auth: UserAuth,
    Query(query): Query<VideoListQuery>,
) -> Result<Json<Video>, ApiError> {
    let profile_id = owned_profile(&state, query.profile, auth.user_id).await?;

    let video = VideoRepository::new(state.pool.clone())
        .find_by_profile(profile_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Video not found".to_string()))?;

    Ok(Json(video.into()))
}

/// PUT /api/v1/videos/:id
pub async fn update_video(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(id): Path<Uuid>,
    Json(request): Json<UpsertVideoRequest>,
) -> Result<Json<Video>, ApiError> {
    request.validate()?;

    let video = VideoRepository::new(state.pool.clone())
        .update(
            id,
            auth.user_id,
            request.video_source,
            &request.video_url,
            &request.video_description,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Video not found".to_string()))?;

    Ok(Json(video.into()))
}

/// DELETE /api/v1/videos/:id
pub async fn delete_video(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = VideoRepository::new(state.pool.clone())
        .delete(id, auth.user_id)
        .await?;

    if !deleted {
        return Err(ApiError::NotFound("Video not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Video deleted")))
}
