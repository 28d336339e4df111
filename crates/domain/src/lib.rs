//! Domain layer for the CardLink backend.
//!
//! This crate contains:
//! - Domain models (Card, InvitationCode, UserProfile, Link, Connection)
//! - Request/response payloads with validation rules
//! - The link-ordering planner and notification payloads

pub mod models;
pub mod services;
