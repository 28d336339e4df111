//! Card endpoints: the public card resolver and the back-office
//! provisioning surface.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain::models::{
    Card, CardFilter, CardResponse, Link, ProvisionCardsRequest, UserProfile, Video,
};
use persistence::repositories::{
    AnalyticsRepository, CardRepository, LinkRepository, ProfileRepository, UserRepository,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ClientIp, OptionalUserAuth};
use crate::routes::MessageResponse;

/// What scanning a card resolves to.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CardLookupResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// GET /api/v1/cards/:card_id
///
/// Public resolver behind the QR code. An owned card lands on the
/// owner's active profile and counts a de-duplicated view (never for
/// the owner's own scans); an unowned card answers 403 so the client
/// can start the registration flow.
pub async fn get_card(
    State(state): State<AppState>,
    OptionalUserAuth(auth): OptionalUserAuth,
    client_ip: ClientIp,
    Path(card_id): Path<Uuid>,
) -> Result<Json<CardLookupResponse>, ApiError> {
    let card: Card = CardRepository::new(state.pool.clone())
        .find_by_id(card_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Card not found".to_string()))?
        .into();

    // Cards outside circulation don't resolve
    if card.is_deleted || !(card.printed || card.assigned) {
        return Err(ApiError::NotFound("Card not found".to_string()));
    }

    let Some(owner_id) = card.user_id else {
        return Err(ApiError::Forbidden(
            "Card is not registered yet".to_string(),
        ));
    };

    let profile = ProfileRepository::new(state.pool.clone())
        .find_active_by_user(owner_id)
        .await?;

    let Some(profile) = profile else {
        return Ok(Json(CardLookupResponse {
            profile: None,
            links: Vec::new(),
            video: None,
            message: Some("The card owner has no active profile".to_string()),
        }));
    };
    let profile: UserProfile = profile.into();

    let is_owner = auth.map(|a| a.user_id == owner_id).unwrap_or(false);
    if !is_owner {
        AnalyticsRepository::new(state.pool.clone())
            .record_view_deduplicated(profile.id, client_ip.as_str())
            .await?;
    }

    let links = LinkRepository::new(state.pool.clone())
        .list_active(profile.id, None)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let video = crate::routes::profiles::profile_video(&state, profile.id).await?;

    Ok(Json(CardLookupResponse {
        profile: Some(profile),
        links,
        video,
        message: None,
    }))
}

/// POST /api/v1/admin/cards/provision
pub async fn provision_cards(
    State(state): State<AppState>,
    Json(request): Json<ProvisionCardsRequest>,
) -> Result<(StatusCode, Json<Vec<CardResponse>>), ApiError> {
    request.validate()?;

    let cards = CardRepository::new(state.pool.clone())
        .provision(request.count, Some(request.label.as_str()), request.printed)
        .await?;

    let base = &state.config.links.profile_base_url;
    let responses = cards
        .into_iter()
        .map(|entity| CardResponse::from_card(entity.into(), base))
        .collect();

    Ok((StatusCode::CREATED, Json(responses)))
}

#[derive(Debug, Deserialize)]
pub struct CardListQuery {
    pub filter: Option<CardFilter>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    100
}

/// GET /api/v1/admin/cards
pub async fn list_cards(
    State(state): State<AppState>,
    Query(query): Query<CardListQuery>,
) -> Result<Json<Vec<CardResponse>>, ApiError> {
    let cards = CardRepository::new(state.pool.clone())
        .list(query.filter, query.limit.clamp(1, 1000), query.offset.max(0))
        .await?;

    let base = &state.config.links.profile_base_url;
    Ok(Json(
        cards
            .into_iter()
            .map(|entity| CardResponse::from_card(entity.into(), base))
            .collect(),
    ))
}

/// POST /api/v1/admin/cards/:card_id/unbind
///
/// Retires a bound card. The former owner's account is deactivated, not
/// deleted; their data stays for audit.
pub async fn unbind_card(
    State(state): State<AppState>,
    Path(card_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    // Retiring the card and deactivating its owner commit together
    let mut tx = state.pool.begin().await?;

    let former_owner = CardRepository::unbind(&mut *tx, card_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Card not found or not bound".to_string()))?;

    UserRepository::deactivate(&mut *tx, former_owner).await?;

    tx.commit().await?;

    tracing::info!(card_id = %card_id, user_id = %former_owner, "Card unbound, owner deactivated");

    Ok(Json(MessageResponse::new(
        "Card unbound and owner deactivated",
    )))
}
