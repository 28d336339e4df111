//! Analytics event models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Kinds of analytics events recorded against a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsEventType {
    ProfileViews,
    SavedContacts,
    ExchangedContacts,
}

impl AnalyticsEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsEventType::ProfileViews => "profile_views",
            AnalyticsEventType::SavedContacts => "saved_contacts",
            AnalyticsEventType::ExchangedContacts => "exchanged_contacts",
        }
    }

    pub const ALL: [AnalyticsEventType; 3] = [
        AnalyticsEventType::ProfileViews,
        AnalyticsEventType::SavedContacts,
        AnalyticsEventType::ExchangedContacts,
    ];
}

impl fmt::Display for AnalyticsEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalyticsEventType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "profile_views" => Ok(AnalyticsEventType::ProfileViews),
            "saved_contacts" => Ok(AnalyticsEventType::SavedContacts),
            "exchanged_contacts" => Ok(AnalyticsEventType::ExchangedContacts),
            _ => Err(()),
        }
    }
}

/// Windowed counts for one event type.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AnalyticsSummary {
    pub total_count: i64,
    pub one_month_count: i64,
    pub six_month_count: i64,
    pub one_year_count: i64,
    pub two_year_count: i64,
}

/// Request body for the public analytics-event endpoint.
///
/// Only `save_contact` is accepted here; profile views and contact
/// exchanges are recorded by their own endpoints.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct RecordEventRequest {
    #[validate(length(min = 1, message = "This field is required"))]
    pub event: String,

    pub profile: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_round_trip() {
        for t in AnalyticsEventType::ALL {
            assert_eq!(AnalyticsEventType::from_str(t.as_str()), Ok(t));
        }
        assert!(AnalyticsEventType::from_str("page_views").is_err());
    }

    #[test]
    fn test_summary_defaults_to_zero() {
        let summary = AnalyticsSummary::default();
        assert_eq!(summary.total_count, 0);
        assert_eq!(summary.two_year_count, 0);
    }
}
