use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid OTP")]
    InvalidOtp,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Card invalid: {0}")]
    CardInvalid(String),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Validation failure reported per field, matching the wire contract
    /// of form validation.
    #[error("Validation error")]
    ValidationDetails(Vec<ValidationDetail>),

    /// Duplicate connection and absent-link failures report 404 with a
    /// message; clients of the original API depend on that status.
    #[error("{0}")]
    NotFoundWithMessage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<ValidationDetail>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationDetail {
    pub field: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", msg, None)
            }
            ApiError::InvalidOtp => (
                StatusCode::UNAUTHORIZED,
                "invalid_otp",
                "Invalid invitation code".to_string(),
                None,
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::CardInvalid(msg) => (StatusCode::BAD_REQUEST, "card_invalid", msg, None),
            ApiError::EmailTaken => (
                StatusCode::BAD_REQUEST,
                "email_taken",
                "A user with this email already exists".to_string(),
                None,
            ),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg, None)
            }
            ApiError::ValidationDetails(details) => {
                let message = match details.as_slice() {
                    [single] => single.message.clone(),
                    many => format!("{} validation errors", many.len()),
                };
                (
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    message,
                    Some(details),
                )
            }
            ApiError::NotFoundWithMessage(msg) => {
                (StatusCode::NOT_FOUND, "not_found", msg, None)
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl ApiError {
    /// A single-field validation failure.
    pub fn field(field: &str, message: &str) -> Self {
        ApiError::ValidationDetails(vec![ValidationDetail {
            field: field.to_string(),
            message: message.to_string(),
        }])
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".into()),
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        "23505" => ApiError::Conflict("Resource already exists".into()),
                        "23503" => ApiError::NotFound("Referenced resource not found".into()),
                        _ => ApiError::Internal(format!("Database error: {}", db_err)),
                    }
                } else {
                    ApiError::Internal(format!("Database error: {}", db_err))
                }
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<ValidationDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| ValidationDetail {
                    field: field.to_string(),
                    message: e.message.clone().map(|m| m.to_string()).unwrap_or_default(),
                })
            })
            .collect();

        ApiError::ValidationDetails(details)
    }
}

impl From<shared::password::PolicyViolation> for ApiError {
    fn from(violation: shared::password::PolicyViolation) -> Self {
        ApiError::field(violation.field, &violation.message)
    }
}

impl From<shared::password::PasswordError> for ApiError {
    fn from(err: shared::password::PasswordError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<shared::jwt::JwtError> for ApiError {
    fn from(err: shared::jwt::JwtError) -> Self {
        match err {
            shared::jwt::JwtError::EncodingError(msg) => ApiError::Internal(msg),
            shared::jwt::JwtError::TokenExpired => {
                ApiError::Unauthorized("Token has expired".into())
            }
            shared::jwt::JwtError::InvalidToken => {
                ApiError::Unauthorized("Invalid token".into())
            }
        }
    }
}

impl From<persistence::repositories::link::LinkRearrangeError> for ApiError {
    fn from(err: persistence::repositories::link::LinkRearrangeError) -> Self {
        use persistence::repositories::link::LinkRearrangeError;
        match err {
            LinkRearrangeError::LinkNotFound => {
                ApiError::NotFoundWithMessage("Invalid link id".into())
            }
            LinkRearrangeError::Database(db) => db.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_invalid_otp_is_unauthorized() {
        let response = ApiError::InvalidOtp.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_card_invalid_is_bad_request() {
        let response = ApiError::CardInvalid("Card is not eligible".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_email_taken_is_bad_request() {
        let response = ApiError::EmailTaken.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_duplicate_connection_contract_is_not_found() {
        let response =
            ApiError::NotFoundWithMessage("Connection already exists".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_field_validation_is_bad_request() {
        let response = ApiError::field("link1", "This field is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_policy_violation_maps_to_field_detail() {
        let violation = shared::password::PolicyViolation {
            field: "password",
            message: "Password is too similar to email".to_string(),
        };
        let error: ApiError = violation.into();
        match error {
            ApiError::ValidationDetails(details) => {
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].field, "password");
            }
            other => panic!("unexpected error variant: {:?}", other),
        }
    }

    #[test]
    fn test_from_sqlx_row_not_found() {
        let error: ApiError = sqlx::Error::RowNotFound.into();
        match error {
            ApiError::NotFound(msg) => assert_eq!(msg, "Resource not found"),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_rearrange_missing_link_is_not_found() {
        let error: ApiError =
            persistence::repositories::link::LinkRearrangeError::LinkNotFound.into();
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
