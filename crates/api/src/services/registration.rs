//! Registration workflow.
//!
//! Redeeming the invitation, creating the account and its default
//! settings, and binding the card happen in one transaction; if any step
//! fails the invitation stays unused and the card stays free. The welcome
//! mail goes out only after the transaction commits.

use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use domain::models::{RegisterRequest, RegisterResponse, UserAccount};
use domain::services::notification::Notification;
use persistence::repositories::{
    CardRepository, InvitationRepository, UserRepository, UserSettingsRepository,
};
use shared::jwt::JwtConfig;
use shared::password::{hash_password, validate_password_policy};

use crate::error::ApiError;
use crate::services::EmailService;

#[derive(Clone)]
pub struct RegistrationService {
    pool: PgPool,
    cards: CardRepository,
    users: UserRepository,
    jwt: JwtConfig,
    email: EmailService,
}

impl RegistrationService {
    pub fn new(pool: PgPool, jwt: JwtConfig, email: EmailService) -> Self {
        Self {
            cards: CardRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            pool,
            jwt,
            email,
        }
    }

    /// Registers an account against a card and an invitation code.
    pub async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, ApiError> {
        // Card gate first: an arbitrary UUID guess must fail before any
        // credential checking happens
        let card: domain::models::Card = self
            .cards
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
        validate_password_policy(
            &request.password,
            &request.email,
            Some(&request.first_name),
        )?;

        if self.users.email_exists(&request.email).await? {
            return Err(ApiError::EmailTaken);
        }

        let password_hash = hash_password(&request.password)?;

        let mut tx = self.pool.begin().await?;

        let redeemed =
            InvitationRepository::redeem(&mut *tx, &request.email, &request.invitation_code)
                .await?;
        if !redeemed {
            return Err(ApiError::InvalidOtp);
        }

        let user = UserRepository::create(
            &mut *tx,
            &request.email,
            &password_hash,
            &request.first_name,
            &request.last_name,
        )
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => ApiError::EmailTaken,
            _ => ApiError::from(err),
        })?;

        UserSettingsRepository::create_defaults(&mut *tx, user.id).await?;

        let bound = CardRepository::bind(&mut *tx, request.card, user.id).await?;
        if !bound {
            // Eligible a moment ago but claimed concurrently
            return Err(ApiError::CardInvalid(
                "Card is not available for registration".to_string(),
            ));
        }

        tx.commit().await?;

        let account: UserAccount = user.into();
        info!(user_id = %account.id, card_id = %request.card, "User registered");

        self.email.send_detached(Notification::Welcome {
            email: account.email.clone(),
            first_name: account.first_name.clone(),
        });

        let access_token = self.jwt.generate_token(account.id)?;
        Ok(RegisterResponse {
            user: account.into(),
            access_token,
        })
    }
}
