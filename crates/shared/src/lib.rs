//! Shared utilities and common types for the CardLink backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Password hashing and the registration password policy
//! - Gestalt string-similarity ratio (password weakness heuristic)
//! - One-time code and token generation
//! - JWT access tokens
//! - Common validation logic

pub mod crypto;
pub mod jwt;
pub mod password;
pub mod similarity;
pub mod validation;
