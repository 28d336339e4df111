//! Repository for the HTTP request log.

use sqlx::PgPool;
use uuid::Uuid;

/// One request log row to be inserted.
#[derive(Debug, Clone)]
pub struct NewRequestLog {
    pub endpoint: String,
    pub method: String,
    pub user_id: Option<Uuid>,
    pub status_code: i16,
    pub remote_address: Option<String>,
    pub exec_time_ms: i32,
    pub request_body: String,
    pub response_body: String,
}

/// Repository for request log operations. Insert-only; rows are read
/// through the database directly.
#[derive(Clone)]
pub struct RequestLogRepository {
    pool: PgPool,
}

impl RequestLogRepository {
    /// Creates a new request log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a request log row.
    pub async fn insert(&self, log: &NewRequestLog) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO request_logs (
                endpoint, method, user_id, status_code, remote_address,
                exec_time_ms, request_body, response_body
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&log.endpoint)
        .bind(&log.method)
        .bind(log.user_id)
        .bind(log.status_code)
        .bind(log.remote_address.as_deref())
        .bind(log.exec_time_ms)
        .bind(&log.request_body)
        .bind(&log.response_body)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
