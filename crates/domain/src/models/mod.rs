//! Domain models and API payloads.

pub mod analytics;
pub mod card;
pub mod connection;
pub mod invitation;
pub mod link;
pub mod profile;
pub mod settings;
pub mod user;
pub mod video;

pub use analytics::{AnalyticsEventType, AnalyticsSummary, RecordEventRequest};
pub use card::{BindingState, Card, CardFilter, CardResponse, ProvisionCardsRequest};
pub use connection::{Connection, CreateConnectionRequest};
pub use invitation::{InvitationCode, InvitationResponse, IssueInvitationRequest};
pub use link::{CreateLinkRequest, Link, LinkType, RearrangeRequest};
pub use profile::{
    default_sections, CreateProfileRequest, ProfileSummary, SectionEntry, UserProfile,
};
pub use settings::{Theme, UpdateSettingsRequest, UserSettings};
pub use user::{
    ForgotPasswordConfirmRequest, ForgotPasswordRequest, LoginRequest, RegisterRequest,
    RegisterResponse, ResetPasswordRequest, TokenResponse, UserAccount, UserResponse,
};
pub use video::{UpsertVideoRequest, Video, VideoSource};
