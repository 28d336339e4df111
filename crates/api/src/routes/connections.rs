//! Connection (contact exchange) endpoints.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use domain::models::{AnalyticsEventType, Connection, CreateConnectionRequest};
use domain::services::notification::Notification;
use persistence::repositories::connection::{ConnectionInsertError, DuplicateConnection};
use persistence::repositories::{
    AnalyticsRepository, ConnectionRepository, ProfileRepository, UserRepository,
    UserSettingsRepository,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ClientIp, UserAuth};

/// POST /api/v1/connections
///
/// Public: a visitor leaves their contact details with a profile. Each
/// exchange also counts as an `exchanged_contacts` event and, when the
/// owner's settings allow, mails the owner.
pub async fn create_connection(
    State(state): State<AppState>,
    client_ip: ClientIp,
    Json(request): Json<CreateConnectionRequest>,
) -> Result<(StatusCode, Json<Connection>), ApiError> {
    request.validate()?;

    let profile = ProfileRepository::new(state.pool.clone())
        .find_by_id(request.profile)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

    let connection = ConnectionRepository::new(state.pool.clone())
        .create(
            profile.id,
            &request.name,
            &request.email,
            &request.contact_number,
            request.company_name.as_deref(),
        )
        .await
        .map_err(|err| match err {
            ConnectionInsertError::Duplicate(DuplicateConnection::Email) => {
                ApiError::NotFoundWithMessage(
                    "A connection with this email already exists".to_string(),
                )
            }
            ConnectionInsertError::Duplicate(DuplicateConnection::ContactNumber) => {
                ApiError::NotFoundWithMessage(
                    "A connection with this contact number already exists".to_string(),
                )
            }
            ConnectionInsertError::Database(db) => db.into(),
        })?;

    AnalyticsRepository::new(state.pool.clone())
        .record(
            profile.id,
            AnalyticsEventType::ExchangedContacts,
            client_ip.as_str(),
        )
        .await?;

    notify_owner(&state, profile.user_id, &connection.name, &connection.email).await?;

    Ok((StatusCode::CREATED, Json(connection.into())))
}

#[derive(Debug, Deserialize)]
pub struct ConnectionListQuery {
    pub profile: Uuid,
}

/// GET /api/v1/connections?profile=…
pub async fn list_connections(
    State(state): State<AppState>,
    auth: UserAuth,
    Query(query): Query<ConnectionListQuery>,
) -> Result<Json<Vec<Connection>>, ApiError> {
    let profile = ProfileRepository::new(state.pool.clone())
        .find_by_id_for_user(query.profile, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

    let connections = ConnectionRepository::new(state.pool.clone())
        .list_by_profile(profile.id)
        .await?;

    Ok(Json(connections.into_iter().map(Into::into).collect()))
}

/// Mails the profile owner about the new connection, settings permitting.
async fn notify_owner(
    state: &AppState,
    owner_id: Uuid,
    connection_name: &str,
    connection_email: &str,
) -> Result<(), ApiError> {
    let wants_mail = UserSettingsRepository::new(state.pool.clone())
        .find_by_user(owner_id)
        .await?
        .map(|settings| settings.email_notifications)
        .unwrap_or(false);
    if !wants_mail {
        return Ok(());
    }

    let Some(owner) = UserRepository::new(state.pool.clone())
        .find_by_id(owner_id)
        .await?
    else {
        return Ok(());
    };

    state.email.send_detached(Notification::NewConnection {
        owner_email: owner.email,
        owner_first_name: owner.first_name,
        connection_name: connection_name.to_string(),
        connection_email: connection_email.to_string(),
    });

    Ok(())
}
