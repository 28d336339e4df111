//! Profile link models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Kind of a profile link. Ordering is maintained per (profile, type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    Website,
    Review,
    Social,
}

impl LinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Website => "website",
            LinkType::Review => "review",
            LinkType::Social => "social",
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "website" => Ok(LinkType::Website),
            "review" => Ok(LinkType::Review),
            "social" => Ok(LinkType::Social),
            _ => Err(()),
        }
    }
}

/// A link on a profile. Positions are 1-based and contiguous among
/// non-deleted links of the same (profile, type) partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Link {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub link_type: LinkType,
    pub url: String,
    /// Provider name (icon lookup on the client); required for
    /// review/social links.
    pub provider: Option<String>,
    /// Free-form metadata, e.g. a display title for website links.
    pub meta: serde_json::Value,
    pub position: i32,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a link.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateLinkRequest {
    pub profile: Uuid,

    pub link_type: LinkType,

    #[validate(custom(function = "shared::validation::validate_link_url"))]
    pub url: String,

    pub provider: Option<String>,

    #[serde(default = "empty_object")]
    pub meta: serde_json::Value,
}

fn empty_object() -> serde_json::Value {
    serde_json::json!({})
}

impl CreateLinkRequest {
    /// Provider is required for everything except plain website links.
    pub fn requires_provider(&self) -> bool {
        self.link_type != LinkType::Website
    }
}

/// Request body for the rearrange endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RearrangeRequest {
    pub link1: Option<Uuid>,
    pub link2: Option<Uuid>,
    pub link_type: Option<LinkType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_type_round_trip() {
        for t in [LinkType::Website, LinkType::Review, LinkType::Social] {
            assert_eq!(LinkType::from_str(t.as_str()), Ok(t));
        }
        assert!(LinkType::from_str("video").is_err());
    }

    #[test]
    fn test_link_type_serde_is_snake_case() {
        assert_eq!(serde_json::to_string(&LinkType::Review).unwrap(), "\"review\"");
        let parsed: LinkType = serde_json::from_str("\"social\"").unwrap();
        assert_eq!(parsed, LinkType::Social);
    }

    #[test]
    fn test_provider_requirement() {
        let mut request = CreateLinkRequest {
            profile: Uuid::new_v4(),
            link_type: LinkType::Website,
            url: "https://example.com".to_string(),
            provider: None,
            meta: serde_json::Value::Null,
        };
        assert!(!request.requires_provider());

        request.link_type = LinkType::Social;
        assert!(request.requires_provider());
    }

    #[test]
    fn test_create_link_request_url_validation() {
        let request = CreateLinkRequest {
            profile: Uuid::new_v4(),
            link_type: LinkType::Website,
            url: "not a url".to_string(),
            provider: None,
            meta: serde_json::Value::Null,
        };
        assert!(request.validate().is_err());
    }
}
