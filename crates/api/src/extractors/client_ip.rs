//! Client IP extractor.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::request::Parts,
};

/// The client's address, used for analytics de-duplication and the
/// request log. Prefers the first `X-Forwarded-For` hop (the original
/// client when behind a proxy), falling back to the peer address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl ClientIp {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_forwarded_header(value: &str) -> Option<Self> {
        value
            .split(',')
            .next()
            .map(str::trim)
            .filter(|hop| !hop.is_empty())
            .map(|hop| ClientIp(hop.to_string()))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(ip) = parts
            .headers
            .get("X-Forwarded-For")
            .and_then(|v| v.to_str().ok())
            .and_then(ClientIp::from_forwarded_header)
        {
            return Ok(ip);
        }

        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        Ok(ClientIp(peer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_forwarded_hop_wins() {
        let ip = ClientIp::from_forwarded_header("203.0.113.7, 10.0.0.1, 10.0.0.2").unwrap();
        assert_eq!(ip.as_str(), "203.0.113.7");
    }

    #[test]
    fn test_single_hop() {
        let ip = ClientIp::from_forwarded_header("198.51.100.4").unwrap();
        assert_eq!(ip.as_str(), "198.51.100.4");
    }

    #[test]
    fn test_empty_header_is_rejected() {
        assert!(ClientIp::from_forwarded_header("").is_none());
        assert!(ClientIp::from_forwarded_header("  ").is_none());
    }
}
