//! Application services.

pub mod email;
pub mod registration;

pub use email::EmailService;
pub use registration::RegistrationService;
