//! Use cases behind the assessment and task routes.

use std::sync::Arc;

use chrono::NaiveDate;
use db::models::{
    daily_task::DailyTask,
    life_assessment::{AssessmentScores, LifeAssessment, ScoreValidationError},
};
use rand::RngCore;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use super::{
    stores::{AssessmentStore, TaskStore},
    task_generator::{TaskGenerationRequest, TaskGenerator},
    weakness_selector::weakest_categories,
};

#[derive(Debug, Error)]
pub enum CoachingError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Validation(#[from] ScoreValidationError),
    #[error("No life assessment found. Please complete your assessment first.")]
    AssessmentNotFound,
    #[error("Task not found")]
    TaskNotFound,
}

/// The user a request acts on behalf of.
#[derive(Debug, Clone)]
pub struct CoachedUser {
    pub id: Uuid,
    pub display_name: Option<String>,
}

pub fn completion_message(completed: bool) -> &'static str {
    if completed {
        "Task completed! Great job!"
    } else {
        "Task marked as incomplete"
    }
}

#[derive(Clone)]
pub struct CoachingService {
    assessments: Arc<dyn AssessmentStore>,
    tasks: Arc<dyn TaskStore>,
    generator: TaskGenerator,
}

impl CoachingService {
    pub fn new(
        assessments: Arc<dyn AssessmentStore>,
        tasks: Arc<dyn TaskStore>,
        generator: TaskGenerator,
    ) -> Self {
        Self {
            assessments,
            tasks,
            generator,
        }
    }

    /// Validate and save a new assessment; onboarding is marked complete in the same write.
    pub async fn submit_assessment(
        &self,
        user_id: Uuid,
        submission: &Map<String, Value>,
    ) -> Result<LifeAssessment, CoachingError> {
        let scores = AssessmentScores::from_submission(submission)?;
        let assessment = self
            .assessments
            .create_and_complete_onboarding(user_id, &scores)
            .await?;

        info!(
            user_id = %user_id,
            assessment_id = %assessment.id,
            average = scores.average(),
            "Saved life assessment"
        );
        Ok(assessment)
    }

    pub async fn latest_assessment(
        &self,
        user_id: Uuid,
    ) -> Result<Option<LifeAssessment>, CoachingError> {
        Ok(self.assessments.latest_for_user(user_id).await?)
    }

    /// Generate and store today's three tasks, replacing any earlier batch for `today`.
    pub async fn generate_daily_tasks(
        &self,
        user: &CoachedUser,
        today: NaiveDate,
        rng: &mut (dyn RngCore + Send),
    ) -> Result<Vec<DailyTask>, CoachingError> {
        let assessment = self
            .assessments
            .latest_for_user(user.id)
            .await?
            .ok_or(CoachingError::AssessmentNotFound)?;

        let scores = assessment.scores();
        let focus = weakest_categories(&scores);
        let request = TaskGenerationRequest {
            scores,
            focus,
            user_name: user.display_name.clone(),
        };

        let generated = self.generator.generate(&request, rng).await;
        let tasks = self
            .tasks
            .replace_for_day(user.id, today, Some(assessment.id), &generated)
            .await?;

        info!(
            user_id = %user.id,
            assessment_id = %assessment.id,
            focus = ?focus,
            task_count = tasks.len(),
            "Generated daily tasks"
        );
        Ok(tasks)
    }

    pub async fn tasks_for_day(
        &self,
        user_id: Uuid,
        day: NaiveDate,
    ) -> Result<Vec<DailyTask>, CoachingError> {
        Ok(self.tasks.find_for_day(user_id, day).await?)
    }

    pub async fn set_task_completion(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        completed: bool,
    ) -> Result<DailyTask, CoachingError> {
        let task = self
            .tasks
            .set_completed(user_id, task_id, completed)
            .await?
            .ok_or(CoachingError::TaskNotFound)?;

        info!(user_id = %user_id, task_id = %task_id, completed, "Updated task completion");
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use db::models::life_category::LifeCategory;
    use rand::rngs::mock::StepRng;
    use serde_json::json;

    use super::*;
    use crate::services::{
        completion::{CompletionError, CompletionRequest, CompletionService},
        fallback_tasks::pool,
        task_generator::GeneratedTask,
    };

    #[derive(Default)]
    struct MemoryAssessments {
        rows: Mutex<Vec<LifeAssessment>>,
    }

    #[async_trait]
    impl AssessmentStore for MemoryAssessments {
        async fn latest_for_user(
            &self,
            user_id: Uuid,
        ) -> Result<Option<LifeAssessment>, sqlx::Error> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|a| a.user_id == user_id)
                .cloned())
        }

        async fn create_and_complete_onboarding(
            &self,
            user_id: Uuid,
            scores: &AssessmentScores,
        ) -> Result<LifeAssessment, sqlx::Error> {
            let now = Utc::now();
            let row = LifeAssessment {
                id: Uuid::new_v4(),
                user_id,
                health_score: scores.health,
                career_score: scores.career,
                relationships_score: scores.relationships,
                finances_score: scores.finances,
                personal_growth_score: scores.personal_growth,
                leisure_score: scores.leisure,
                created_at: now,
                updated_at: now,
            };
            self.rows.lock().unwrap().push(row.clone());
            Ok(row)
        }
    }

    #[derive(Default)]
    struct MemoryTasks {
        rows: Mutex<Vec<(NaiveDate, DailyTask)>>,
    }

    #[async_trait]
    impl TaskStore for MemoryTasks {
        async fn replace_for_day(
            &self,
            user_id: Uuid,
            day: NaiveDate,
            assessment_id: Option<Uuid>,
            tasks: &[GeneratedTask],
        ) -> Result<Vec<DailyTask>, sqlx::Error> {
            let now = Utc::now();
            let mut rows = self.rows.lock().unwrap();
            rows.retain(|(d, t)| !(*d == day && t.user_id == user_id));
            let created: Vec<DailyTask> = tasks
                .iter()
                .map(|t| DailyTask {
                    id: Uuid::new_v4(),
                    user_id,
                    assessment_id,
                    title: t.title.clone(),
                    description: t.description.clone(),
                    category: t.category,
                    estimated_minutes: t.estimated_minutes,
                    motivational_note: t.motivational_note.clone(),
                    completed: false,
                    completed_at: None,
                    created_at: now,
                    updated_at: now,
                })
                .collect();
            rows.extend(created.iter().cloned().map(|t| (day, t)));
            Ok(created)
        }

        async fn find_for_day(
            &self,
            user_id: Uuid,
            day: NaiveDate,
        ) -> Result<Vec<DailyTask>, sqlx::Error> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|(d, t)| *d == day && t.user_id == user_id)
                .map(|(_, t)| t.clone())
                .collect())
        }

        async fn set_completed(
            &self,
            user_id: Uuid,
            task_id: Uuid,
            completed: bool,
        ) -> Result<Option<DailyTask>, sqlx::Error> {
            let mut rows = self.rows.lock().unwrap();
            Ok(rows
                .iter_mut()
                .find(|(_, t)| t.id == task_id && t.user_id == user_id)
                .map(|(_, t)| {
                    t.completed = completed;
                    t.completed_at = completed.then(Utc::now);
                    t.clone()
                }))
        }
    }

    struct ShortReply;

    #[async_trait]
    impl CompletionService for ShortReply {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionError> {
            Ok(json!([
                {"title": "a", "description": "b", "category": "health",
                 "estimatedMinutes": 5, "motivationalNote": "c"},
                {"title": "a", "description": "b", "category": "career",
                 "estimatedMinutes": 5, "motivationalNote": "c"}
            ])
            .to_string())
        }
    }

    fn service(generator: TaskGenerator) -> (CoachingService, Arc<MemoryAssessments>, Arc<MemoryTasks>) {
        let assessments = Arc::new(MemoryAssessments::default());
        let tasks = Arc::new(MemoryTasks::default());
        let service = CoachingService::new(assessments.clone(), tasks.clone(), generator);
        (service, assessments, tasks)
    }

    fn example_submission() -> Map<String, Value> {
        json!({
            "health": 2,
            "career": 3,
            "relationships": 8,
            "finances": 9,
            "personal_growth": 7,
            "leisure": 6
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    fn user() -> CoachedUser {
        CoachedUser {
            id: Uuid::new_v4(),
            display_name: Some("Sam".to_string()),
        }
    }

    #[tokio::test]
    async fn test_generation_requires_assessment() {
        let (service, _, _) = service(TaskGenerator::fallback_only());
        let mut rng = StepRng::new(0, 0);
        let err = service
            .generate_daily_tasks(&user(), Utc::now().date_naive(), &mut rng)
            .await
            .unwrap_err();
        assert!(matches!(err, CoachingError::AssessmentNotFound));
    }

    #[tokio::test]
    async fn test_invalid_submission_writes_nothing() {
        let (service, assessments, _) = service(TaskGenerator::fallback_only());
        let mut submission = example_submission();
        submission.insert("career".to_string(), json!(0));

        let err = service
            .submit_assessment(Uuid::new_v4(), &submission)
            .await
            .unwrap_err();
        assert!(matches!(err, CoachingError::Validation(ref e) if e.category == LifeCategory::Career));
        assert!(assessments.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fallback_generation_targets_weakest_areas() {
        let (service, _, tasks) = service(TaskGenerator::fallback_only());
        let user = user();
        let today = Utc::now().date_naive();
        let assessment = service
            .submit_assessment(user.id, &example_submission())
            .await
            .unwrap();

        let mut rng = StepRng::new(0, 0);
        let generated = service
            .generate_daily_tasks(&user, today, &mut rng)
            .await
            .unwrap();

        assert_eq!(generated.len(), 3);
        assert_eq!(generated[0].category, LifeCategory::Health);
        assert_eq!(generated[0].title, pool(LifeCategory::Health)[0].title);
        assert_eq!(generated[1].category, LifeCategory::Career);
        assert_eq!(generated[1].title, pool(LifeCategory::Career)[0].title);
        assert!(generated.iter().all(|t| t.assessment_id == Some(assessment.id)));
        assert_eq!(tasks.rows.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_malformed_live_reply_still_yields_three_tasks() {
        let (service, _, _) = service(TaskGenerator::new(Some(Arc::new(ShortReply))));
        let user = user();
        let today = Utc::now().date_naive();
        service
            .submit_assessment(user.id, &example_submission())
            .await
            .unwrap();

        let mut rng = StepRng::new(0, 0);
        let first = service.generate_daily_tasks(&user, today, &mut rng).await.unwrap();
        let second = service.generate_daily_tasks(&user, today, &mut rng).await.unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(second.len(), 3);

        let stored = service.tasks_for_day(user.id, today).await.unwrap();
        assert_eq!(stored.len(), 3);
        assert_eq!(stored[0].id, second[0].id);
    }

    #[tokio::test]
    async fn test_completion_toggle_and_ownership() {
        let (service, _, _) = service(TaskGenerator::fallback_only());
        let user = user();
        service
            .submit_assessment(user.id, &example_submission())
            .await
            .unwrap();
        let mut rng = StepRng::new(0, 0);
        let tasks = service
            .generate_daily_tasks(&user, Utc::now().date_naive(), &mut rng)
            .await
            .unwrap();

        let done = service
            .set_task_completion(user.id, tasks[0].id, true)
            .await
            .unwrap();
        assert!(done.completed);
        assert!(done.completed_at.is_some());

        let err = service
            .set_task_completion(Uuid::new_v4(), tasks[0].id, true)
            .await
            .unwrap_err();
        assert!(matches!(err, CoachingError::TaskNotFound));
        assert_eq!(completion_message(true), "Task completed! Great job!");
    }
}
