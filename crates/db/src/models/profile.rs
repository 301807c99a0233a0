use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, Sqlite, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

/// Per-user profile keyed by the id issued by the auth backend.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Profile {
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub onboarding_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Profile>(
            r#"SELECT id, email, full_name, onboarding_completed, created_at, updated_at
               FROM profiles
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Create the profile or refresh its identity fields. Absent values keep what is stored.
    pub async fn upsert_identity(
        pool: &SqlitePool,
        id: Uuid,
        email: Option<&str>,
        full_name: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Profile>(
            r#"INSERT INTO profiles (id, email, full_name, onboarding_completed, created_at, updated_at)
               VALUES ($1, $2, $3, 0, $4, $5)
               ON CONFLICT (id) DO UPDATE
                  SET email = COALESCE(excluded.email, profiles.email),
                      full_name = COALESCE(excluded.full_name, profiles.full_name),
                      updated_at = excluded.updated_at
               RETURNING id, email, full_name, onboarding_completed, created_at, updated_at"#,
        )
        .bind(id)
        .bind(email)
        .bind(full_name)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    pub async fn mark_onboarding_completed<'e, E>(
        executor: E,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<(), sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"INSERT INTO profiles (id, onboarding_completed, created_at, updated_at)
               VALUES ($1, 1, $2, $3)
               ON CONFLICT (id) DO UPDATE
                  SET onboarding_completed = 1,
                      updated_at = excluded.updated_at"#,
        )
        .bind(id)
        .bind(now)
        .bind(now)
        .execute(executor)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DBService;

    #[tokio::test]
    async fn test_onboarding_flag_survives_identity_sync() {
        let db = DBService::new_in_memory().await.unwrap();
        let id = Uuid::new_v4();
        let now = Utc::now();

        let profile = Profile::upsert_identity(&db.pool, id, Some("a@b.co"), Some("Ada"), now)
            .await
            .unwrap();
        assert!(!profile.onboarding_completed);

        Profile::mark_onboarding_completed(&db.pool, id, now).await.unwrap();
        let profile = Profile::upsert_identity(&db.pool, id, None, None, now)
            .await
            .unwrap();
        assert!(profile.onboarding_completed);
        assert_eq!(profile.email.as_deref(), Some("a@b.co"));
        assert_eq!(profile.full_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_mark_onboarding_creates_missing_profile() {
        let db = DBService::new_in_memory().await.unwrap();
        let id = Uuid::new_v4();
        Profile::mark_onboarding_completed(&db.pool, id, Utc::now())
            .await
            .unwrap();
        let profile = Profile::find_by_id(&db.pool, id).await.unwrap().unwrap();
        assert!(profile.onboarding_completed);
        assert!(profile.email.is_none());
    }
}
