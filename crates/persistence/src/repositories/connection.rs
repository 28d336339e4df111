//! Repository for connection database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ConnectionEntity;

/// Which uniqueness rule rejected a connection insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateConnection {
    Email,
    ContactNumber,
}

/// Failure modes of recording a connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionInsertError {
    #[error("connection already exists for this {0:?}")]
    Duplicate(DuplicateConnection),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Repository for connection operations.
#[derive(Clone)]
pub struct ConnectionRepository {
    pool: PgPool,
}

impl ConnectionRepository {
    /// Creates a new connection repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records a contact exchanged with a profile.
    ///
    /// Duplicates are detected through the two named unique constraints
    /// rather than a pre-check, so concurrent submissions cannot slip
    /// past the rule.
    pub async fn create(
        &self,
        profile_id: Uuid,
        name: &str,
        email: &str,
        contact_number: &str,
        company_name: Option<&str>,
    ) -> Result<ConnectionEntity, ConnectionInsertError> {
        let inserted = sqlx::query_as::<_, ConnectionEntity>(
            r#"
            INSERT INTO connections (profile_id, name, email, contact_number, company_name)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, profile_id, name, email, contact_number, company_name, created_at
            "#,
        )
        .bind(profile_id)
        .bind(name)
        .bind(email)
        .bind(contact_number)
        .bind(company_name)
        .fetch_one(&self.pool)
        .await;

        inserted.map_err(|err| match classify_duplicate(&err) {
            Some(duplicate) => ConnectionInsertError::Duplicate(duplicate),
            None => ConnectionInsertError::Database(err),
        })
    }

    /// Lists the connections of a profile, newest first.
    pub async fn list_by_profile(
        &self,
        profile_id: Uuid,
    ) -> Result<Vec<ConnectionEntity>, sqlx::Error> {
        sqlx::query_as::<_, ConnectionEntity>(
            r#"
            SELECT id, profile_id, name, email, contact_number, company_name, created_at
            FROM connections
            WHERE profile_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await
    }
}

fn classify_duplicate(err: &sqlx::Error) -> Option<DuplicateConnection> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    match db_err.constraint() {
        Some("uq_connections_profile_email") => Some(DuplicateConnection::Email),
        Some("uq_connections_profile_contact") => Some(DuplicateConnection::ContactNumber),
        _ => None,
    }
}
