//! HTTP middleware components.

pub mod admin;
pub mod logging;
pub mod request_log;

pub use admin::require_admin;
pub use request_log::request_log_middleware;
