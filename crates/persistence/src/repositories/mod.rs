//! Repository implementations.

pub mod analytics;
pub mod card;
pub mod connection;
pub mod invitation_code;
pub mod link;
pub mod password_reset;
pub mod profile;
pub mod request_log;
pub mod user;
pub mod user_settings;
pub mod video;

pub use analytics::AnalyticsRepository;
pub use card::CardRepository;
pub use connection::ConnectionRepository;
pub use invitation_code::InvitationRepository;
pub use link::LinkRepository;
pub use password_reset::PasswordResetRepository;
pub use profile::ProfileRepository;
pub use request_log::{NewRequestLog, RequestLogRepository};
pub use user::UserRepository;
pub use user_settings::UserSettingsRepository;
pub use video::VideoRepository;
