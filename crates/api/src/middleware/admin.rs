//! Admin API key guard for the back-office card endpoints.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::crypto::sha256_hex;

use crate::app::AppState;
use crate::error::ApiError;

pub const ADMIN_KEY_HEADER: &str = "X-Admin-Key";

/// Requires a valid admin API key in the `X-Admin-Key` header.
///
/// Keys are compared by SHA-256 digest so the configured secret never
/// participates in a direct string comparison.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let provided = request
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing admin API key".to_string()))?;

    let expected = &state.config.security.admin_api_key;
    if expected.is_empty() || sha256_hex(provided) != sha256_hex(expected) {
        return Err(ApiError::Unauthorized("Invalid admin API key".to_string()));
    }

    Ok(next.run(request).await)
}
