use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, Sqlite, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

use super::life_category::LifeCategory;

/// A persisted micro-task belonging to one user's day.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct DailyTask {
    pub id: Uuid,
    pub user_id: Uuid,
    pub assessment_id: Option<Uuid>, // Assessment the batch was generated from
    pub title: String,
    pub description: String,
    pub category: LifeCategory,
    pub estimated_minutes: i32,
    pub motivational_note: Option<String>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateDailyTask {
    pub user_id: Uuid,
    pub assessment_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub category: LifeCategory,
    pub estimated_minutes: i32,
    pub motivational_note: Option<String>,
}

/// Half-open UTC range `[start, end)` covering `day`.
pub fn day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day.and_time(NaiveTime::MIN).and_utc();
    (start, start + Duration::days(1))
}

const DAILY_TASK_COLUMNS: &str = "id, user_id, assessment_id, title, description, category, \
     estimated_minutes, motivational_note, completed, completed_at, created_at, updated_at";

impl DailyTask {
    pub async fn create<'e, E>(
        executor: E,
        data: &CreateDailyTask,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Self, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = format!(
            r#"INSERT INTO daily_tasks (
                   id, user_id, assessment_id, title, description, category,
                   estimated_minutes, motivational_note, completed, created_at, updated_at
               )
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 0, $9, $10)
               RETURNING {DAILY_TASK_COLUMNS}"#
        );
        sqlx::query_as::<_, DailyTask>(&sql)
            .bind(id)
            .bind(data.user_id)
            .bind(data.assessment_id)
            .bind(&data.title)
            .bind(&data.description)
            .bind(data.category)
            .bind(data.estimated_minutes)
            .bind(&data.motivational_note)
            .bind(now)
            .bind(now)
            .fetch_one(executor)
            .await
    }

    /// Tasks created during `day` (UTC), oldest first.
    pub async fn find_for_day(
        pool: &SqlitePool,
        user_id: Uuid,
        day: NaiveDate,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let (start, end) = day_bounds(day);
        let sql = format!(
            r#"SELECT {DAILY_TASK_COLUMNS}
               FROM daily_tasks
               WHERE user_id = $1
                 AND created_at >= $2
                 AND created_at < $3
               ORDER BY created_at ASC, rowid ASC"#
        );
        sqlx::query_as::<_, DailyTask>(&sql)
            .bind(user_id)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }

    pub async fn delete_for_day<'e, E>(
        executor: E,
        user_id: Uuid,
        day: NaiveDate,
    ) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let (start, end) = day_bounds(day);
        let result = sqlx::query(
            r#"DELETE FROM daily_tasks
               WHERE user_id = $1
                 AND created_at >= $2
                 AND created_at < $3"#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    /// Flip the completion flag. Returns `None` when the task does not belong to `user_id`.
    pub async fn set_completed(
        pool: &SqlitePool,
        user_id: Uuid,
        id: Uuid,
        completed: bool,
        now: DateTime<Utc>,
    ) -> Result<Option<Self>, sqlx::Error> {
        let completed_at = completed.then_some(now);
        let sql = format!(
            r#"UPDATE daily_tasks
               SET completed = $3,
                   completed_at = $4,
                   updated_at = $5
               WHERE id = $1 AND user_id = $2
               RETURNING {DAILY_TASK_COLUMNS}"#
        );
        sqlx::query_as::<_, DailyTask>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(completed)
            .bind(completed_at)
            .bind(now)
            .fetch_optional(pool)
            .await
    }
}
