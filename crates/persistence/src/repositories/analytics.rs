//! Repository for analytics event database operations.

use domain::models::AnalyticsEventType;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AnalyticsSummaryEntity;

/// Repository for analytics event operations.
#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    /// Creates a new analytics repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records an event unconditionally.
    pub async fn record(
        &self,
        profile_id: Uuid,
        event_type: AnalyticsEventType,
        ip_address: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO analytics_events (profile_id, event_type, ip_address)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(profile_id)
        .bind(event_type.as_str())
        .bind(ip_address)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Records a profile view unless this address has already viewed
    /// the profile. The existence check and the insert run as one
    /// statement, so repeated views from the same address never produce
    /// a second row.
    ///
    /// Returns `true` if a new view was recorded.
    pub async fn record_view_deduplicated(
        &self,
        profile_id: Uuid,
        ip_address: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO analytics_events (profile_id, event_type, ip_address)
            SELECT $1, $2, $3
            WHERE NOT EXISTS (
                SELECT 1 FROM analytics_events
                WHERE profile_id = $1 AND event_type = $2 AND ip_address = $3
            )
            "#,
        )
        .bind(profile_id)
        .bind(AnalyticsEventType::ProfileViews.as_str())
        .bind(ip_address)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Aggregates per-event counts over the trailing one-month,
    /// six-month, one-year and two-year windows, plus the all-time
    /// total. Event types with no rows are absent from the result.
    pub async fn summarize(
        &self,
        profile_id: Uuid,
    ) -> Result<Vec<AnalyticsSummaryEntity>, sqlx::Error> {
        sqlx::query_as::<_, AnalyticsSummaryEntity>(
            r#"
            SELECT
                event_type,
                COUNT(*) AS total_count,
                COUNT(*) FILTER (WHERE created_at >= NOW() - INTERVAL '1 month') AS one_month_count,
                COUNT(*) FILTER (WHERE created_at >= NOW() - INTERVAL '6 months') AS six_month_count,
                COUNT(*) FILTER (WHERE created_at >= NOW() - INTERVAL '1 year') AS one_year_count,
                COUNT(*) FILTER (WHERE created_at >= NOW() - INTERVAL '2 years') AS two_year_count
            FROM analytics_events
            WHERE profile_id = $1
            GROUP BY event_type
            "#,
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await
    }
}
