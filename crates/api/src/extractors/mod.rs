//! Custom Axum extractors.

pub mod client_ip;
pub mod user_auth;

pub use client_ip::ClientIp;
pub use user_auth::{OptionalUserAuth, UserAuth};
