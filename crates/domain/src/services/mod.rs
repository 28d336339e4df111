//! Domain services.

pub mod notification;
pub mod rearrange;
