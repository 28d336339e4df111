//! Analytics entities (database row mappings).

use std::str::FromStr;

use domain::models::{AnalyticsEventType, AnalyticsSummary};
use sqlx::FromRow;

/// One aggregated row of the windowed analytics summary query.
#[derive(Debug, Clone, FromRow)]
pub struct AnalyticsSummaryEntity {
    pub event_type: String,
    pub total_count: i64,
    pub one_month_count: i64,
    pub six_month_count: i64,
    pub one_year_count: i64,
    pub two_year_count: i64,
}

impl AnalyticsSummaryEntity {
    /// Splits the row into its event type and the summary counts.
    pub fn into_parts(self) -> Option<(AnalyticsEventType, AnalyticsSummary)> {
        let event_type = AnalyticsEventType::from_str(&self.event_type).ok()?;
        Some((
            event_type,
            AnalyticsSummary {
                total_count: self.total_count,
                one_month_count: self.one_month_count,
                six_month_count: self.six_month_count,
                one_year_count: self.one_year_count,
                two_year_count: self.two_year_count,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_parts() {
        let row = AnalyticsSummaryEntity {
            event_type: "profile_views".to_string(),
            total_count: 10,
            one_month_count: 1,
            six_month_count: 4,
            one_year_count: 7,
            two_year_count: 9,
        };
        let (event_type, summary) = row.into_parts().unwrap();
        assert_eq!(event_type, AnalyticsEventType::ProfileViews);
        assert_eq!(summary.total_count, 10);
        assert_eq!(summary.one_month_count, 1);
    }

    #[test]
    fn test_into_parts_rejects_unknown_type() {
        let row = AnalyticsSummaryEntity {
            event_type: "page_views".to_string(),
            total_count: 0,
            one_month_count: 0,
            six_month_count: 0,
            one_year_count: 0,
            two_year_count: 0,
        };
        assert!(row.into_parts().is_none());
    }
}
