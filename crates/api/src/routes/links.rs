//! Profile link endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use domain::models::{CreateLinkRequest, Link, LinkType, RearrangeRequest};
use persistence::repositories::{LinkRepository, ProfileRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::routes::MessageResponse;

#[derive(Debug, Deserialize)]
pub struct LinkListQuery {
    pub profile: Uuid,
    pub link_type: Option<LinkType>,
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

/// POST /api/v1/links
pub async fn create_link(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<Link>), ApiError> {
    request.validate()?;

    if request.requires_provider() && request.provider.as_deref().unwrap_or("").is_empty() {
        return Err(ApiError::field("provider", "This field is required"));
    }

    let profile_id = owned_profile(&state, request.profile, auth.user_id).await?;

    // Explicit `"meta": null` collapses to an empty object; the column is NOT NULL.
    let meta = if request.meta.is_null() {
        serde_json::json!({})
    } else {
        request.meta.clone()
    };

    let link = LinkRepository::new(state.pool.clone())
        .create(
            profile_id,
            request.link_type,
            &request.url,
            request.provider.as_deref(),
            &meta,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// GET /api/v1/links?profile=…&link_type=…
pub async fn list_links(
    State(state): State<AppState>,
    auth: UserAuth,
    Query(query): Query<LinkListQuery>,
) -> Result<Json<Vec<Link>>, ApiError> {
    let profile_id = owned_profile(&state, query.profile, auth.user_id).await?;

    let links = LinkRepository::new(state.pool.clone())
        .list_active(profile_id, query.link_type)
        .await?;

    Ok(Json(links.into_iter().map(Into::into).collect()))
}

/// The rearrange partition lives on the caller's active profile; links
/// held by any other profile are invisible to the endpoint.
fn rearrange_profile(anchor_profile: Uuid, active_profile: Option<Uuid>) -> Option<Uuid> {
    active_profile.filter(|id| *id == anchor_profile)
}

/// POST /api/v1/links/rearrange
///
/// Moves `link1` into `link2`'s slot, shifting the links between them,
/// within one (type) partition of the caller's active profile. Missing
/// body fields answer 404 keyed by field; links outside that partition
/// answer 404 with a message.
pub async fn rearrange_links(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(body): Json<RearrangeRequest>,
) -> Result<Json<Vec<Link>>, ApiError> {
    let missing =
        |field: &str| ApiError::NotFoundWithMessage(format!("{}: This field is required", field));
    let invalid = || ApiError::NotFoundWithMessage("Invalid link id".to_string());

    let link1 = body.link1.ok_or_else(|| missing("link1"))?;
    let link2 = body.link2.ok_or_else(|| missing("link2"))?;
    let link_type = body.link_type.ok_or_else(|| missing("link_type"))?;

    let links = LinkRepository::new(state.pool.clone());
    let anchor = links.find_active_by_id(link1).await?.ok_or_else(invalid)?;

    let active = ProfileRepository::new(state.pool.clone())
        .find_active_by_user(auth.user_id)
        .await?;
    let profile_id =
        rearrange_profile(anchor.profile_id, active.map(|p| p.id)).ok_or_else(invalid)?;

    let reordered = links.rearrange(profile_id, link_type, link1, link2).await?;

    Ok(Json(reordered.into_iter().map(Into::into).collect()))
}

/// DELETE /api/v1/links/:id
pub async fn delete_link(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = LinkRepository::new(state.pool.clone())
        .soft_delete(id, auth.user_id)
        .await?;

    if !deleted {
        return Err(ApiError::NotFoundWithMessage("Invalid link id".to_string()));
    }

    Ok(Json(MessageResponse::new("Link deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rearrange_is_scoped_to_the_active_profile() {
        let active = Uuid::new_v4();
        assert_eq!(rearrange_profile(active, Some(active)), Some(active));
        // link anchored on another profile of the same user
        assert_eq!(rearrange_profile(Uuid::new_v4(), Some(active)), None);
        // caller has no active profile at all
        assert_eq!(rearrange_profile(active, None), None);
    }
}
