//! Profile endpoints.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use validator::Validate;

use domain::models::{
    AnalyticsSummary, CreateProfileRequest, Link, ProfileSummary, SectionEntry, UserProfile,
    UserSettings, Video,
};
use persistence::repositories::{
    AnalyticsRepository, CardRepository, LinkRepository, ProfileRepository,
    UserSettingsRepository, VideoRepository,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ClientIp, OptionalUserAuth, UserAuth};

/// The caller's active profile with everything their dashboard shows.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ActiveProfileResponse {
    pub profile: UserProfile,
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,
    pub settings: Option<UserSettings>,
    pub analytics: HashMap<String, AnalyticsSummary>,
}

/// A profile as shown to visitors.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PublicProfileResponse {
    pub profile: UserProfile,
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,
}

#[derive(Debug, Serialize)]
pub struct NameAvailabilityResponse {
    pub profile_name: String,
    pub available: bool,
}

#[derive(Debug, Serialize)]
pub struct QrCodeResponse {
    /// The URL the caller's QR code encodes.
    pub card_link: String,
}

fn map_name_conflict(err: sqlx::Error) -> ApiError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            ApiError::field("profile_name", "This profile name is already taken")
        }
        _ => ApiError::from(err),
    }
}

/// POST /api/v1/profiles
pub async fn create_profile(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    request.validate()?;

    let profile = ProfileRepository::new(state.pool.clone())
        .create(auth.user_id, &request)
        .await
        .map_err(map_name_conflict)?;

    Ok((StatusCode::CREATED, Json(profile.into())))
}

/// GET /api/v1/profiles
pub async fn list_profiles(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<Vec<ProfileSummary>>, ApiError> {
    let profiles = ProfileRepository::new(state.pool.clone())
        .list_by_user(auth.user_id)
        .await?;

    Ok(Json(
        profiles
            .into_iter()
            .map(|entity| UserProfile::from(entity).into())
            .collect(),
    ))
}

/// GET /api/v1/profiles/:id
pub async fn get_profile(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(id): Path<uuid::Uuid>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = ProfileRepository::new(state.pool.clone())
        .find_by_id_for_user(id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

    Ok(Json(profile.into()))
}

/// PUT /api/v1/profiles/:id
pub async fn update_profile(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(id): Path<uuid::Uuid>,
    Json(request): Json<CreateProfileRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    request.validate()?;

    let profile = ProfileRepository::new(state.pool.clone())
        .update(id, auth.user_id, &request)
        .await
        .map_err(map_name_conflict)?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

    Ok(Json(profile.into()))
}

/// DELETE /api/v1/profiles/:id
pub async fn delete_profile(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(id): Path<uuid::Uuid>,
) -> Result<Json<super::MessageResponse>, ApiError> {
    let deleted = ProfileRepository::new(state.pool.clone())
        .delete(id, auth.user_id)
        .await?;

    if !deleted {
        return Err(ApiError::NotFound("Profile not found".to_string()));
    }
    Ok(Json(super::MessageResponse::new("Profile deleted")))
}

/// GET /api/v1/profiles/active
pub async fn active_profile(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<ActiveProfileResponse>, ApiError> {
    let profile: UserProfile = ProfileRepository::new(state.pool.clone())
        .find_active_by_user(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No active profile".to_string()))?
        .into();

    let links = active_links(&state, profile.id).await?;
    let video = profile_video(&state, profile.id).await?;
    let settings = UserSettingsRepository::new(state.pool.clone())
        .find_by_user(auth.user_id)
        .await?
        .map(Into::into);
    let analytics = summarize(&state, profile.id).await?;

    Ok(Json(ActiveProfileResponse {
        profile,
        links,
        video,
        settings,
        analytics,
    }))
}

/// GET /api/v1/profiles/by-name/:profile_name
///
/// Public page lookup. A visit counts as one `profile_views` event per
/// client address; the owner's own visits never count.
pub async fn profile_by_name(
    State(state): State<AppState>,
    OptionalUserAuth(auth): OptionalUserAuth,
    client_ip: ClientIp,
    Path(profile_name): Path<String>,
) -> Result<Json<PublicProfileResponse>, ApiError> {
    let profile: UserProfile = ProfileRepository::new(state.pool.clone())
        .find_by_name(&profile_name)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?
        .into();

    let is_owner = auth.map(|a| a.user_id == profile.user_id).unwrap_or(false);
    if !is_owner {
        AnalyticsRepository::new(state.pool.clone())
            .record_view_deduplicated(profile.id, client_ip.as_str())
            .await?;
    }

    let links = active_links(&state, profile.id).await?;
    let video = profile_video(&state, profile.id).await?;
    Ok(Json(PublicProfileResponse {
        profile,
        links,
        video,
    }))
}

/// GET /api/v1/profiles/check-name/:profile_name
pub async fn check_name(
    State(state): State<AppState>,
    Path(profile_name): Path<String>,
) -> Result<Json<NameAvailabilityResponse>, ApiError> {
    let taken = ProfileRepository::new(state.pool.clone())
        .name_exists(&profile_name)
        .await?;

    Ok(Json(NameAvailabilityResponse {
        profile_name,
        available: !taken,
    }))
}

/// GET /api/v1/profiles/:id/sections
pub async fn get_sections(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(id): Path<uuid::Uuid>,
) -> Result<Json<Vec<SectionEntry>>, ApiError> {
    let profiles = ProfileRepository::new(state.pool.clone());
    let profile = profiles
        .find_by_id_for_user(id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

    let sections = profiles.sections(profile.id).await?.unwrap_or_default();
    Ok(Json(sections))
}

/// PUT /api/v1/profiles/:id/sections
pub async fn update_sections(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(id): Path<uuid::Uuid>,
    Json(sections): Json<Vec<SectionEntry>>,
) -> Result<Json<Vec<SectionEntry>>, ApiError> {
    let profiles = ProfileRepository::new(state.pool.clone());
    let profile = profiles
        .find_by_id_for_user(id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

    profiles.replace_sections(profile.id, &sections).await?;
    Ok(Json(sections))
}

/// GET /api/v1/profiles/qr-code
///
/// The URL the caller's physical card resolves to. Encoding it into an
/// image is the client's concern.
pub async fn qr_code(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<QrCodeResponse>, ApiError> {
    let card = CardRepository::new(state.pool.clone())
        .find_active_by_user(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No card bound to this account".to_string()))?;

    let base = state.config.links.profile_base_url.trim_end_matches('/');
    Ok(Json(QrCodeResponse {
        card_link: format!("{}/{}", base, card.card_id),
    }))
}

async fn active_links(state: &AppState, profile_id: uuid::Uuid) -> Result<Vec<Link>, ApiError> {
    let links = LinkRepository::new(state.pool.clone())
        .list_active(profile_id, None)
        .await?;
    Ok(links.into_iter().map(Into::into).collect())
}

pub(crate) async fn profile_video(
    state: &AppState,
    profile_id: uuid::Uuid,
) -> Result<Option<Video>, ApiError> {
    let video = VideoRepository::new(state.pool.clone())
        .find_by_profile(profile_id)
        .await?;
    Ok(video.map(Into::into))
}

/// Summary rows keyed by event type; absent types report zeroes.
pub(crate) async fn summarize(
    state: &AppState,
    profile_id: uuid::Uuid,
) -> Result<HashMap<String, AnalyticsSummary>, ApiError> {
    let rows = AnalyticsRepository::new(state.pool.clone())
        .summarize(profile_id)
        .await?;

    let mut summary: HashMap<String, AnalyticsSummary> =
        domain::models::AnalyticsEventType::ALL
            .iter()
            .map(|event| (event.as_str().to_string(), AnalyticsSummary::default()))
            .collect();

    for row in rows {
        if let Some((event_type, counts)) = row.into_parts() {
            summary.insert(event_type.as_str().to_string(), counts);
        }
    }

    Ok(summary)
}
