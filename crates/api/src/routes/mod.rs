//! HTTP route handlers.

use serde::Serialize;

/// Plain message envelope used by endpoints that return no resource.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

pub mod analytics;
pub mod auth;
pub mod cards;
pub mod connections;
pub mod health;
pub mod links;
pub mod profiles;
pub mod settings;
pub mod videos;
