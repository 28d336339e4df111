//! Per-user settings endpoints.

use axum::{extract::State, Json};
use validator::Validate;

use domain::models::{UpdateSettingsRequest, UserSettings};
use persistence::repositories::UserSettingsRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// GET /api/v1/settings
pub async fn get_settings(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<UserSettings>, ApiError> {
    let settings = UserSettingsRepository::new(state.pool.clone())
        .find_by_user(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Settings not found".to_string()))?;

    Ok(Json(settings.into()))
}

/// PATCH /api/v1/settings
pub async fn update_settings(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<UserSettings>, ApiError> {
    request.validate()?;

    let settings = UserSettingsRepository::new(state.pool.clone())
        .update(auth.user_id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Settings not found".to_string()))?;

    Ok(Json(settings.into()))
}
