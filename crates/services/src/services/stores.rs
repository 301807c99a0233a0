//! Persistence seams used by the coaching use cases, with SQLite implementations.
//!
//! Every operation takes the authenticated user id and scopes its reads and writes to it.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use db::{
    DBService,
    models::{
        daily_task::{CreateDailyTask, DailyTask, day_bounds},
        life_assessment::{AssessmentScores, LifeAssessment},
        profile::Profile,
    },
};
use tracing::debug;
use uuid::Uuid;

use super::task_generator::GeneratedTask;

#[async_trait]
pub trait AssessmentStore: Send + Sync {
    /// `None` when the user has never completed an assessment.
    async fn latest_for_user(&self, user_id: Uuid) -> Result<Option<LifeAssessment>, sqlx::Error>;

    /// Insert the assessment and flag onboarding as complete, atomically.
    async fn create_and_complete_onboarding(
        &self,
        user_id: Uuid,
        scores: &AssessmentScores,
    ) -> Result<LifeAssessment, sqlx::Error>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Replace whatever batch exists for `day` with `tasks`, atomically.
    async fn replace_for_day(
        &self,
        user_id: Uuid,
        day: NaiveDate,
        assessment_id: Option<Uuid>,
        tasks: &[GeneratedTask],
    ) -> Result<Vec<DailyTask>, sqlx::Error>;

    async fn find_for_day(&self, user_id: Uuid, day: NaiveDate)
    -> Result<Vec<DailyTask>, sqlx::Error>;

    /// `None` when no task with `task_id` belongs to `user_id`.
    async fn set_completed(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        completed: bool,
    ) -> Result<Option<DailyTask>, sqlx::Error>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find(&self, user_id: Uuid) -> Result<Option<Profile>, sqlx::Error>;

    async fn sync_identity(
        &self,
        user_id: Uuid,
        email: Option<&str>,
        full_name: Option<&str>,
    ) -> Result<Profile, sqlx::Error>;
}

#[async_trait]
impl AssessmentStore for DBService {
    async fn latest_for_user(&self, user_id: Uuid) -> Result<Option<LifeAssessment>, sqlx::Error> {
        LifeAssessment::find_latest_for_user(&self.pool, user_id).await
    }

    async fn create_and_complete_onboarding(
        &self,
        user_id: Uuid,
        scores: &AssessmentScores,
    ) -> Result<LifeAssessment, sqlx::Error> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        let assessment =
            LifeAssessment::create(&mut *tx, Uuid::new_v4(), user_id, scores, now).await?;
        Profile::mark_onboarding_completed(&mut *tx, user_id, now).await?;
        tx.commit().await?;
        Ok(assessment)
    }
}

#[async_trait]
impl TaskStore for DBService {
    async fn replace_for_day(
        &self,
        user_id: Uuid,
        day: NaiveDate,
        assessment_id: Option<Uuid>,
        tasks: &[GeneratedTask],
    ) -> Result<Vec<DailyTask>, sqlx::Error> {
        // Rows belong to a day through `created_at`, so it must fall inside `day`.
        let (start, end) = day_bounds(day);
        let now = Utc::now();
        let stamped_at = if (start..end).contains(&now) { now } else { start };
        let mut tx = self.pool.begin().await?;

        let removed = DailyTask::delete_for_day(&mut *tx, user_id, day).await?;
        debug!(user_id = %user_id, %day, removed, "Cleared previous daily tasks");

        let mut created = Vec::with_capacity(tasks.len());
        for task in tasks {
            let data = CreateDailyTask {
                user_id,
                assessment_id,
                title: task.title.clone(),
                description: task.description.clone(),
                category: task.category,
                estimated_minutes: task.estimated_minutes,
                motivational_note: task.motivational_note.clone(),
            };
            created.push(DailyTask::create(&mut *tx, &data, Uuid::new_v4(), stamped_at).await?);
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn find_for_day(
        &self,
        user_id: Uuid,
        day: NaiveDate,
    ) -> Result<Vec<DailyTask>, sqlx::Error> {
        DailyTask::find_for_day(&self.pool, user_id, day).await
    }

    async fn set_completed(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        completed: bool,
    ) -> Result<Option<DailyTask>, sqlx::Error> {
        DailyTask::set_completed(&self.pool, user_id, task_id, completed, Utc::now()).await
    }
}

#[async_trait]
impl ProfileStore for DBService {
    async fn find(&self, user_id: Uuid) -> Result<Option<Profile>, sqlx::Error> {
        Profile::find_by_id(&self.pool, user_id).await
    }

    async fn sync_identity(
        &self,
        user_id: Uuid,
        email: Option<&str>,
        full_name: Option<&str>,
    ) -> Result<Profile, sqlx::Error> {
        Profile::upsert_identity(&self.pool, user_id, email, full_name, Utc::now()).await
    }
}
