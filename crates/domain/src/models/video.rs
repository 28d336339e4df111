//! Profile video models. A profile embeds at most one video.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Hosting service of an embedded profile video.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoSource {
    #[default]
    Youtube,
    Vimeo,
}

impl VideoSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoSource::Youtube => "youtube",
            VideoSource::Vimeo => "vimeo",
        }
    }
}

impl fmt::Display for VideoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VideoSource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "youtube" => Ok(VideoSource::Youtube),
            "vimeo" => Ok(VideoSource::Vimeo),
            _ => Err(()),
        }
    }
}

/// The video embedded on a profile page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Video {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub video_source: VideoSource,
    pub video_url: String,
    pub video_description: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for adding or replacing a profile video.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpsertVideoRequest {
    pub profile: Uuid,

    #[serde(default)]
    pub video_source: VideoSource,

    #[validate(custom(function = "shared::validation::validate_link_url"))]
    pub video_url: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub video_description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_source_round_trip() {
        for source in [VideoSource::Youtube, VideoSource::Vimeo] {
            assert_eq!(VideoSource::from_str(source.as_str()), Ok(source));
        }
        assert!(VideoSource::from_str("dailymotion").is_err());
    }

    #[test]
    fn test_video_source_defaults_to_youtube() {
        let request: UpsertVideoRequest = serde_json::from_str(
            r#"{"profile":"6d4f6a3e-64ba-4dd1-98b3-b7d10905ca9e",
                "video_url":"https://youtu.be/abc",
                "video_description":"intro"}"#,
        )
        .unwrap();
        assert_eq!(request.video_source, VideoSource::Youtube);
    }

    #[test]
    fn test_video_request_validation() {
        let mut request = UpsertVideoRequest {
            profile: Uuid::new_v4(),
            video_source: VideoSource::Vimeo,
            video_url: "https://vimeo.com/12345".to_string(),
            video_description: "about the company".to_string(),
        };
        assert!(request.validate().is_ok());

        request.video_url = "not a url".to_string();
        assert!(request.validate().is_err());

        request.video_url = "https://vimeo.com/12345".to_string();
        request.video_description = "x".repeat(1001);
        assert!(request.validate().is_err());
    }
}
