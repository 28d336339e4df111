//! Repository for profile database operations.

use domain::models::{default_sections, CreateProfileRequest, SectionEntry};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::{ProfileEntity, ProfileSectionEntity};

const PROFILE_COLUMNS: &str = "id, user_id, profile_name, first_name, last_name, company_name, \
     industry, job_title, bio, phones, emails, websites, addresses, is_active, \
     created_at, updated_at";

/// Repository for profile operations.
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Creates a new profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds a profile by identifier.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ProfileEntity>, sqlx::Error> {
        sqlx::query_as::<_, ProfileEntity>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Finds a profile by identifier, scoped to its owner.
    pub async fn find_by_id_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ProfileEntity>, sqlx::Error> {
        sqlx::query_as::<_, ProfileEntity>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Finds a profile by its unique handle.
    pub async fn find_by_name(&self, profile_name: &str) -> Result<Option<ProfileEntity>, sqlx::Error> {
        sqlx::query_as::<_, ProfileEntity>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE profile_name = $1"
        ))
        .bind(profile_name)
        .fetch_optional(&self.pool)
        .await
    }

    /// Finds the active profile of a user, if any.
    pub async fn find_active_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ProfileEntity>, sqlx::Error> {
        sqlx::query_as::<_, ProfileEntity>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1 AND is_active = TRUE"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lists all profiles owned by a user, oldest first.
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ProfileEntity>, sqlx::Error> {
        sqlx::query_as::<_, ProfileEntity>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1 ORDER BY created_at"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Checks whether a profile handle is already taken.
    pub async fn name_exists(&self, profile_name: &str) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM profiles WHERE profile_name = $1)")
                .bind(profile_name)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Creates a profile together with its default section arrangement.
    ///
    /// A user's first profile is always activated. When `is_active` is
    /// requested on a later profile, the user's other profiles are
    /// deactivated in the same transaction.
    pub async fn create(
        &self,
        user_id: Uuid,
        request: &CreateProfileRequest,
    ) -> Result<ProfileEntity, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let (existing,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM profiles WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&mut *tx)
                .await?;
        let activate = request.is_active || existing == 0;

        if activate {
            Self::deactivate_all(&mut *tx, user_id).await?;
        }

        let profile = sqlx::query_as::<_, ProfileEntity>(&format!(
            r#"
            INSERT INTO profiles (
                user_id, profile_name, first_name, last_name, company_name,
                industry, job_title, bio, phones, emails, websites, addresses, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {PROFILE_COLUMNS}
            "#,
        ))
        .bind(user_id)
        .bind(&request.profile_name)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.company_name)
        .bind(&request.industry)
        .bind(&request.job_title)
        .bind(&request.bio)
        .bind(&request.phones)
        .bind(&request.emails)
        .bind(&request.websites)
        .bind(&request.addresses)
        .bind(activate)
        .fetch_one(&mut *tx)
        .await?;

        let sections = serde_json::to_value(default_sections())
            .unwrap_or_else(|_| serde_json::Value::Array(Vec::new()));
        sqlx::query("INSERT INTO profile_sections (profile_id, data) VALUES ($1, $2)")
            .bind(profile.id)
            .bind(sections)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(profile)
    }

    /// Replaces a profile's editable fields.
    ///
    /// Activating via the update deactivates the owner's other profiles
    /// in the same transaction. Deactivating the only active profile is
    /// allowed and leaves the user with no public page.
    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        request: &CreateProfileRequest,
    ) -> Result<Option<ProfileEntity>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        if request.is_active {
            Self::deactivate_all(&mut *tx, user_id).await?;
        }

        let profile = sqlx::query_as::<_, ProfileEntity>(&format!(
            r#"
            UPDATE profiles
            SET profile_name = $3, first_name = $4, last_name = $5, company_name = $6,
                industry = $7, job_title = $8, bio = $9, phones = $10, emails = $11,
                websites = $12, addresses = $13, is_active = $14, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {PROFILE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(user_id)
        .bind(&request.profile_name)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.company_name)
        .bind(&request.industry)
        .bind(&request.job_title)
        .bind(&request.bio)
        .bind(&request.phones)
        .bind(&request.emails)
        .bind(&request.websites)
        .bind(&request.addresses)
        .bind(request.is_active)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(profile)
    }

    /// Deletes a profile owned by a user. Links, sections, connections
    /// and analytics rows go with it via ON DELETE CASCADE.
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetches the section arrangement for a profile.
    pub async fn sections(
        &self,
        profile_id: Uuid,
    ) -> Result<Option<Vec<SectionEntry>>, sqlx::Error> {
        let row = sqlx::query_as::<_, ProfileSectionEntity>(
            "SELECT profile_id, data, updated_at FROM profile_sections WHERE profile_id = $1",
        )
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|entity| serde_json::from_value(entity.data).unwrap_or_default()))
    }

    /// Replaces the section arrangement for a profile.
    pub async fn replace_sections(
        &self,
        profile_id: Uuid,
        sections: &[SectionEntry],
    ) -> Result<bool, sqlx::Error> {
        let data = serde_json::to_value(sections)
            .unwrap_or_else(|_| serde_json::Value::Array(Vec::new()));
        let result = sqlx::query(
            r#"
            INSERT INTO profile_sections (profile_id, data, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (profile_id) DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()
            "#,
        )
        .bind(profile_id)
        .bind(data)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn deactivate_all(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE profiles SET is_active = FALSE, updated_at = NOW() WHERE user_id = $1 AND is_active = TRUE",
        )
        .bind(user_id)
        .execute(conn)
        .await?;
        Ok(())
    }
}
