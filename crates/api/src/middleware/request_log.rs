//! Request-log middleware.
//!
//! Records every API request to the `request_logs` table: endpoint,
//! method, status, execution time, client address, authenticated user
//! and truncated bodies. Best-effort throughout: a failure to record
//! never affects the response. Bodies too large to buffer, or streams
//! with no known size, pass through untouched and are logged empty.

use std::time::Instant;

use axum::{
    body::{to_bytes, Body, Bytes, HttpBody},
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;
use uuid::Uuid;

use persistence::repositories::{NewRequestLog, RequestLogRepository};

use crate::app::AppState;
use crate::extractors::ClientIp;

/// Stored bodies are cut at this many bytes.
const BODY_CAP: usize = 4096;

/// Largest request/response body the middleware will buffer.
const MAX_BUFFER: usize = 2 * 1024 * 1024;

fn should_log(path: &str) -> bool {
    path.starts_with("/api") && !path.starts_with("/api/v1/admin")
}

/// Credentials must not land in the log.
fn carries_credentials(path: &str) -> bool {
    path.starts_with("/api/v1/auth")
}

fn truncate_body(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.chars().take(BODY_CAP).collect()
}

/// `true` when the body advertises a size the middleware may buffer.
fn within_buffer(body: &Body) -> bool {
    match body.size_hint().upper() {
        Some(upper) => upper <= MAX_BUFFER as u64,
        None => false,
    }
}

/// Buffers a body for the log when its size hint allows it.
///
/// Oversized and unbounded bodies are forwarded as-is with no capture.
/// A body that errors mid-read cannot be reconstructed; it is forwarded
/// empty, the same truncation its downstream reader would observe.
async fn capture_body(body: Body) -> (Body, Option<Bytes>) {
    if !within_buffer(&body) {
        return (body, None);
    }
    match to_bytes(body, MAX_BUFFER).await {
        Ok(bytes) => (Body::from(bytes.clone()), Some(bytes)),
        Err(err) => {
            warn!(error = %err, "Failed to buffer body for request log");
            (Body::empty(), None)
        }
    }
}

fn bearer_user_id(request: &Request, state: &AppState) -> Option<Uuid> {
    let token = request
        .headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;
    let claims = state.jwt.validate_token(token).ok()?;
    Uuid::parse_str(&claims.sub).ok()
}

pub async fn request_log_middleware(
    State(state): State<AppState>,
    client_ip: ClientIp,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if !should_log(&path) {
        return next.run(request).await;
    }

    let method = request.method().to_string();
    let user_id = bearer_user_id(&request, &state);
    let redact = carries_credentials(&path);

    let (parts, body) = request.into_parts();
    let (body, captured) = capture_body(body).await;
    let request_body = match &captured {
        Some(bytes) if !redact => truncate_body(bytes),
        _ => String::new(),
    };
    let request = Request::from_parts(parts, body);

    let start = Instant::now();
    let response = next.run(request).await;
    let exec_time_ms = start.elapsed().as_millis() as i32;

    let (parts, body) = response.into_parts();
    let (body, captured) = capture_body(body).await;
    let response_body = match &captured {
        Some(bytes) if !redact => truncate_body(bytes),
        _ => String::new(),
    };

    let log = NewRequestLog {
        endpoint: path,
        method,
        user_id,
        status_code: parts.status.as_u16() as i16,
        remote_address: Some(client_ip.0),
        exec_time_ms,
        request_body,
        response_body,
    };

    // Off the response path; failures are logged and dropped
    let repository = RequestLogRepository::new(state.pool.clone());
    tokio::spawn(async move {
        if let Err(err) = repository.insert(&log).await {
            warn!(error = %err, "Failed to write request log");
        }
    });

    Response::from_parts(parts, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_routes_are_skipped() {
        assert!(should_log("/api/v1/profiles"));
        assert!(should_log("/api/health"));
        assert!(!should_log("/api/v1/admin/cards"));
        assert!(!should_log("/metrics"));
    }

    #[test]
    fn test_auth_bodies_are_redacted() {
        assert!(carries_credentials("/api/v1/auth/register"));
        assert!(carries_credentials("/api/v1/auth/login"));
        assert!(!carries_credentials("/api/v1/links"));
    }

    #[test]
    fn test_truncation_cap() {
        let long = "x".repeat(BODY_CAP * 2);
        assert_eq!(truncate_body(long.as_bytes()).len(), BODY_CAP);
        assert_eq!(truncate_body(b"short"), "short");
    }

    #[test]
    fn test_buffer_gate_honors_size_hint() {
        assert!(within_buffer(&Body::from("{}")));
        assert!(within_buffer(&Body::from(vec![0u8; MAX_BUFFER])));
        assert!(!within_buffer(&Body::from(vec![0u8; MAX_BUFFER + 1])));
    }

    #[tokio::test]
    async fn test_small_body_is_captured_and_forwarded_intact() {
        let (body, captured) = capture_body(Body::from("hello")).await;
        assert_eq!(captured.as_deref(), Some(&b"hello"[..]));
        let forwarded = to_bytes(body, usize::MAX).await.unwrap();
        assert_eq!(&forwarded[..], b"hello");
    }

    #[tokio::test]
    async fn test_oversized_body_passes_through_unbuffered() {
        let payload = vec![7u8; MAX_BUFFER + 1];
        let (body, captured) = capture_body(Body::from(payload.clone())).await;
        assert!(captured.is_none());
        let forwarded = to_bytes(body, usize::MAX).await.unwrap();
        assert_eq!(forwarded.len(), payload.len());
    }
}
