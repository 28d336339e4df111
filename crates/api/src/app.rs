use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use shared::jwt::JwtConfig;

use crate::config::Config;
use crate::middleware::{request_log_middleware, require_admin};
use crate::routes::{
    analytics, auth, cards, connections, health, links, profiles, settings, videos,
};
use crate::services::{EmailService, RegistrationService};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: JwtConfig,
    pub email: EmailService,
    pub registration: RegistrationService,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let jwt = JwtConfig::new(&config.jwt.secret, config.jwt.expiry_hours);
    let email = EmailService::new(config.email.clone(), config.links.clone());
    let registration = RegistrationService::new(pool.clone(), jwt.clone(), email.clone());
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        jwt,
        email,
        registration,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Public and user-facing routes; handlers that need a caller use the
    // UserAuth extractor themselves
    let api_routes = Router::new()
        // Auth
        .route("/api/v1/auth/invitation-code", post(auth::issue_invitation))
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/reset-password", put(auth::reset_password))
        .route("/api/v1/auth/forgot-password", post(auth::forgot_password))
        .route(
            "/api/v1/auth/forgot-password/confirm",
            post(auth::forgot_password_confirm),
        )
        // Profiles
        .route(
            "/api/v1/profiles",
            post(profiles::create_profile).get(profiles::list_profiles),
        )
        .route("/api/v1/profiles/active", get(profiles::active_profile))
        .route("/api/v1/profiles/qr-code", get(profiles::qr_code))
        .route(
            "/api/v1/profiles/by-name/:profile_name",
            get(profiles::profile_by_name),
        )
        .route(
            "/api/v1/profiles/check-name/:profile_name",
            get(profiles::check_name),
        )
        .route(
            "/api/v1/profiles/:id",
            get(profiles::get_profile)
                .put(profiles::update_profile)
                .delete(profiles::delete_profile),
        )
        .route(
            "/api/v1/profiles/:id/sections",
            get(profiles::get_sections).put(profiles::update_sections),
        )
        .route(
            "/api/v1/profiles/:id/analytics",
            get(analytics::profile_analytics),
        )
        // Links
        .route(
            "/api/v1/links",
            post(links::create_link).get(links::list_links),
        )
        .route("/api/v1/links/rearrange", post(links::rearrange_links))
        .route("/api/v1/links/:id", delete(links::delete_link))
        // Videos (one per profile)
        .route(
            "/api/v1/videos",
            post(videos::create_video).get(videos::get_video),
        )
        .route(
            "/api/v1/videos/:id",
            put(videos::update_video).delete(videos::delete_video),
        )
        // Connections & analytics
        .route(
            "/api/v1/connections",
            post(connections::create_connection).get(connections::list_connections),
        )
        .route("/api/v1/analytics/events", post(analytics::record_event))
        // Cards (public resolver)
        .route("/api/v1/cards/:card_id", get(cards::get_card))
        // Settings
        .route(
            "/api/v1/settings",
            get(settings::get_settings).patch(settings::update_settings),
        );

    // Back-office routes behind the admin API key
    let admin_routes = Router::new()
        .route("/api/v1/admin/cards/provision", post(cards::provision_cards))
        .route("/api/v1/admin/cards", get(cards::list_cards))
        .route(
            "/api/v1/admin/cards/:card_id/unbind",
            post(cards::unbind_card),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .merge(admin_routes)
        // Global middleware; the request log sits innermost so it sees
        // uncompressed bodies
        .layer(middleware::from_fn_with_state(
            state.clone(),
            request_log_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
