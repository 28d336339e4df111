//! Analytics endpoints.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::models::{AnalyticsEventType, AnalyticsSummary, RecordEventRequest};
use persistence::repositories::{AnalyticsRepository, ProfileRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ClientIp, UserAuth};
use crate::routes::MessageResponse;

/// POST /api/v1/analytics/events
///
/// Public event recorder. Only `save_contact` is accepted; views and
/// exchanges come in through their own endpoints.
pub async fn record_event(
    State(state): State<AppState>,
    client_ip: ClientIp,
    Json(request): Json<RecordEventRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    request.validate()?;

    if request.event != "save_contact" {
        return Err(ApiError::Validation(format!(
            "Unknown event: {}",
            request.event
        )));
    }

    let profile = ProfileRepository::new(state.pool.clone())
        .find_by_id(request.profile)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

    AnalyticsRepository::new(state.pool.clone())
        .record(
            profile.id,
            AnalyticsEventType::SavedContacts,
            client_ip.as_str(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Event recorded")),
    ))
}

/// GET /api/v1/profiles/:id/analytics
pub async fn profile_analytics(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<HashMap<String, AnalyticsSummary>>, ApiError> {
    let profile = ProfileRepository::new(state.pool.clone())
        .find_by_id_for_user(id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

    let summary = super::profiles::summarize(&state, profile.id).await?;
    Ok(Json(summary))
}
