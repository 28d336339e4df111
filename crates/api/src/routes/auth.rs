//! Authentication and account endpoints.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{Duration, Utc};
use tracing::info;
use validator::Validate;

use domain::models::{
    ForgotPasswordConfirmRequest, ForgotPasswordRequest, InvitationResponse,
    IssueInvitationRequest, LoginRequest, RegisterRequest, RegisterResponse,
    ResetPasswordRequest, TokenResponse,
};
use domain::services::notification::Notification;
use persistence::repositories::{
    CardRepository, InvitationRepository, PasswordResetRepository, UserRepository,
    UserSettingsRepository,
};
use shared::crypto::{generate_otp, generate_reset_token, sha256_hex};
use shared::password::{hash_password, validate_password_policy, verify_password};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::routes::MessageResponse;

/// Reset links die after this long.
const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// POST /api/v1/auth/invitation-code
///
/// Issues (or refreshes) the one-time code for an email address and
/// mails it. The code never appears in the response.
pub async fn issue_invitation(
    State(state): State<AppState>,
    Json(request): Json<IssueInvitationRequest>,
) -> Result<Json<InvitationResponse>, ApiError> {
    // Card gate before anything else; possession of eligible stock is
    // what makes an invitation requestable
    let card: domain::models::Card = CardRepository::new(state.pool.clone())
        .find_by_id(request.card)
        .await?
        .ok_or_else(|| ApiError::CardInvalid("Card not found".to_string()))?
        .into();
    if !card.is_eligible() {
        return Err(ApiError::CardInvalid(
            "Card is not available for registration".to_string(),
        ));
    }

    request.validate()?;
    validate_password_policy(&request.password, &request.email, Some(&request.first_name))?;

    let users = UserRepository::new(state.pool.clone());
    if users.email_exists(&request.email).await? {
        return Err(ApiError::EmailTaken);
    }

    let code = generate_otp();
    let invitation = InvitationRepository::new(state.pool.clone())
        .issue(&request.email, &request.first_name, &code)
        .await?;

    state.email.send_detached(Notification::InvitationOtp {
        email: invitation.email.clone(),
        first_name: invitation.first_name.clone(),
        code,
    });

    Ok(Json(InvitationResponse {
        email: invitation.email,
        first_name: invitation.first_name,
    }))
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let response = state.registration.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    request.validate()?;

    let invalid = || ApiError::Unauthorized("Invalid email or password".to_string());

    let user = UserRepository::new(state.pool.clone())
        .find_by_email(&request.email)
        .await?
        .ok_or_else(invalid)?;

    if !user.is_active || !verify_password(&request.password, &user.password_hash)? {
        return Err(invalid());
    }

    let access_token = state.jwt.generate_token(user.id)?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.config.jwt.expiry_hours * 3600,
    }))
}

/// PUT /api/v1/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    request.validate()?;

    let users = UserRepository::new(state.pool.clone());
    let user = users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Account no longer exists".to_string()))?;

    if !verify_password(&request.old_password, &user.password_hash)? {
        return Err(ApiError::field("old_password", "Old password is incorrect"));
    }

    validate_password_policy(&request.new_password, &user.email, Some(&user.first_name))?;

    let password_hash = hash_password(&request.new_password)?;
    users.set_password_hash(user.id, &password_hash).await?;
    info!(user_id = %user.id, "Password changed");

    notify_password_changed(&state, user.id, &user.email, &user.first_name).await?;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}

/// POST /api/v1/auth/forgot-password
///
/// Always answers 200; whether the email is registered is not leaked.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    request.validate()?;

    let user = UserRepository::new(state.pool.clone())
        .find_by_email(&request.email)
        .await?;

    if let Some(user) = user.filter(|user| user.is_active) {
        let token = generate_reset_token();
        PasswordResetRepository::new(state.pool.clone())
            .create(
                user.id,
                &sha256_hex(&token),
                Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS),
            )
            .await?;

        state.email.send_detached(Notification::PasswordReset {
            email: user.email,
            first_name: user.first_name,
            token,
        });
    }

    Ok(Json(MessageResponse::new(
        "If the email is registered, a reset link has been sent",
    )))
}

/// POST /api/v1/auth/forgot-password/confirm
pub async fn forgot_password_confirm(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordConfirmRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    request.validate()?;

    let invalid = || ApiError::field("token", "Invalid or expired token");

    let resets = PasswordResetRepository::new(state.pool.clone());
    let token = resets
        .find_by_hash(&sha256_hex(&request.token))
        .await?
        .ok_or_else(invalid)?;

    if !token.is_redeemable(Utc::now()) {
        return Err(invalid());
    }

    let users = UserRepository::new(state.pool.clone());
    let user = users
        .find_by_id(token.user_id)
        .await?
        .ok_or_else(invalid)?;

    validate_password_policy(&request.password, &user.email, Some(&user.first_name))?;

    // Redeem first; a token raced to reuse must not change the password twice
    if !resets.mark_used(token.id).await? {
        return Err(invalid());
    }

    let password_hash = hash_password(&request.password)?;
    users.set_password_hash(user.id, &password_hash).await?;
    info!(user_id = %user.id, "Password reset via token");

    notify_password_changed(&state, user.id, &user.email, &user.first_name).await?;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}

/// Sends the password-changed mail when the user's settings allow it.
async fn notify_password_changed(
    state: &AppState,
    user_id: uuid::Uuid,
    email: &str,
    first_name: &str,
) -> Result<(), ApiError> {
    let settings = UserSettingsRepository::new(state.pool.clone())
        .find_by_user(user_id)
        .await?;

    if settings.map(|s| s.email_notifications).unwrap_or(false) {
        state.email.send_detached(Notification::PasswordChanged {
            email: email.to_string(),
            first_name: first_name.to_string(),
        });
    }

    Ok(())
}
