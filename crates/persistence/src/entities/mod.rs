//! Database row mappings.

pub mod analytics;
pub mod card;
pub mod connection;
pub mod invitation_code;
pub mod link;
pub mod profile;
pub mod user;
pub mod user_settings;
pub mod video;

pub use analytics::AnalyticsSummaryEntity;
pub use card::CardEntity;
pub use connection::ConnectionEntity;
pub use invitation_code::InvitationCodeEntity;
pub use link::LinkEntity;
pub use profile::{ProfileEntity, ProfileSectionEntity};
pub use user::{PasswordResetTokenEntity, UserEntity};
pub use user_settings::UserSettingsEntity;
pub use video::VideoEntity;
