//! Read-only summary behind the dashboard: life-wheel radar data and today's progress.

use std::sync::Arc;

use chrono::NaiveDate;
use db::models::{
    daily_task::DailyTask,
    life_assessment::{AssessmentScores, LifeAssessment, MAX_SCORE},
    life_category::LifeCategory,
    profile::Profile,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::{
    stores::{AssessmentStore, ProfileStore, TaskStore},
    weakness_selector::weakest_categories,
};

/// One spoke of the radar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct WheelPoint {
    pub category: LifeCategory,
    pub label: String,
    pub score: i32,
    pub full_mark: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct LifeWheel {
    pub points: Vec<WheelPoint>,
    pub average_score: f64,
    pub focus_areas: Vec<LifeCategory>,
    pub encouragement: String,
}

impl LifeWheel {
    pub fn from_scores(scores: &AssessmentScores) -> Self {
        let points = LifeCategory::ALL
            .iter()
            .map(|&category| WheelPoint {
                category,
                label: category.label().to_string(),
                score: scores.score(category),
                full_mark: MAX_SCORE,
            })
            .collect();
        let average_score = scores.average();

        Self {
            points,
            average_score,
            focus_areas: weakest_categories(scores).to_vec(),
            encouragement: encouragement(average_score).to_string(),
        }
    }
}

fn encouragement(average: f64) -> &'static str {
    if average >= 8.0 {
        "You're thriving! Keep up the amazing work!"
    } else if average >= 6.0 {
        "You're doing well! Small improvements will make a big difference."
    } else if average >= 4.0 {
        "You're on the right path. Every step forward counts!"
    } else {
        "This is your starting point. Growth begins with a single step forward."
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct TaskProgress {
    pub completed: usize,
    pub total: usize,
    pub percentage: f64,
    pub message: Option<String>,
}

impl TaskProgress {
    pub fn from_tasks(tasks: &[DailyTask]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        let percentage = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };
        let message = match (completed, total) {
            (_, 0) => None,
            (0, _) => Some("Ready to start your journey? Every task completed is a step forward!"),
            (c, t) if c < t => Some("Great progress! Keep the momentum going!"),
            _ => Some(
                "Amazing! You've completed all your tasks today. You're building a better life, one day at a time!",
            ),
        };

        Self {
            completed,
            total,
            percentage,
            message: message.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct DashboardSummary {
    pub onboarding_completed: bool,
    pub display_name: String,
    pub assessment: Option<LifeAssessment>,
    pub life_wheel: Option<LifeWheel>,
    pub tasks: Vec<DailyTask>,
    pub progress: TaskProgress,
}

impl DashboardSummary {
    pub fn build(
        profile: Option<&Profile>,
        fallback_name: Option<&str>,
        assessment: Option<LifeAssessment>,
        tasks: Vec<DailyTask>,
    ) -> Self {
        let non_blank = |name: &&str| !name.trim().is_empty();
        let display_name = profile
            .and_then(|p| p.full_name.as_deref())
            .filter(non_blank)
            .or(fallback_name.filter(non_blank))
            .unwrap_or("Friend")
            .to_string();

        Self {
            onboarding_completed: profile.is_some_and(|p| p.onboarding_completed),
            display_name,
            life_wheel: assessment.as_ref().map(|a| LifeWheel::from_scores(&a.scores())),
            assessment,
            progress: TaskProgress::from_tasks(&tasks),
            tasks,
        }
    }
}

#[derive(Clone)]
pub struct DashboardService {
    profiles: Arc<dyn ProfileStore>,
    assessments: Arc<dyn AssessmentStore>,
    tasks: Arc<dyn TaskStore>,
}

impl DashboardService {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        assessments: Arc<dyn AssessmentStore>,
        tasks: Arc<dyn TaskStore>,
    ) -> Self {
        Self {
            profiles,
            assessments,
            tasks,
        }
    }

    pub async fn summary(
        &self,
        user_id: Uuid,
        display_name: Option<&str>,
        today: NaiveDate,
    ) -> Result<DashboardSummary, sqlx::Error> {
        let profile = self.profiles.find(user_id).await?;
        let assessment = self.assessments.latest_for_user(user_id).await?;
        let tasks = self.tasks.find_for_day(user_id, today).await?;
        Ok(DashboardSummary::build(
            profile.as_ref(),
            display_name,
            assessment,
            tasks,
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use db::DBService;

    use super::*;

    fn scores(values: [i32; 6]) -> AssessmentScores {
        let [health, career, relationships, finances, personal_growth, leisure] = values;
        AssessmentScores {
            health,
            career,
            relationships,
            finances,
            personal_growth,
            leisure,
        }
    }

    fn task(completed: bool) -> DailyTask {
        let now = Utc::now();
        DailyTask {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            assessment_id: None,
            title: "t".to_string(),
            description: "d".to_string(),
            category: LifeCategory::Leisure,
            estimated_minutes: 5,
            motivational_note: None,
            completed,
            completed_at: completed.then_some(now),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_wheel_has_six_points_in_order() {
        let wheel = LifeWheel::from_scores(&scores([2, 3, 8, 9, 7, 6]));
        let categories: Vec<_> = wheel.points.iter().map(|p| p.category).collect();
        assert_eq!(categories, LifeCategory::ALL.to_vec());
        assert_eq!(wheel.points[0].label, "Health & Wellness");
        assert_eq!(wheel.points[3].score, 9);
        assert!(wheel.points.iter().all(|p| p.full_mark == 10));
        assert_eq!(wheel.average_score, 5.8);
        assert_eq!(
            wheel.focus_areas,
            vec![LifeCategory::Health, LifeCategory::Career]
        );
        assert_eq!(
            wheel.encouragement,
            "You're on the right path. Every step forward counts!"
        );
    }

    #[test]
    fn test_encouragement_tiers() {
        assert_eq!(encouragement(8.0), "You're thriving! Keep up the amazing work!");
        assert!(encouragement(7.9).starts_with("You're doing well!"));
        assert!(encouragement(4.0).starts_with("You're on the right path."));
        assert!(encouragement(3.9).starts_with("This is your starting point."));
    }

    #[test]
    fn test_progress_messages() {
        let empty = TaskProgress::from_tasks(&[]);
        assert_eq!(empty.percentage, 0.0);
        assert!(empty.message.is_none());

        let none = TaskProgress::from_tasks(&[task(false), task(false), task(false)]);
        assert!(none.message.unwrap().starts_with("Ready to start"));

        let some = TaskProgress::from_tasks(&[task(true), task(false), task(false)]);
        assert_eq!(some.completed, 1);
        assert!((some.percentage - 100.0 / 3.0).abs() < 1e-9);
        assert!(some.message.unwrap().starts_with("Great progress"));

        let all = TaskProgress::from_tasks(&[task(true), task(true), task(true)]);
        assert_eq!(all.percentage, 100.0);
        assert!(all.message.unwrap().starts_with("Amazing!"));
    }

    fn profile(full_name: Option<&str>) -> Profile {
        let now = Utc::now();
        Profile {
            id: Uuid::new_v4(),
            email: None,
            full_name: full_name.map(str::to_string),
            onboarding_completed: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_display_name_precedence() {
        let stored = profile(Some("Samira"));
        let blank = profile(Some("  "));
        let unnamed = profile(None);

        let name = |p: Option<&Profile>, token: Option<&str>| {
            DashboardSummary::build(p, token, None, Vec::new()).display_name
        };
        assert_eq!(name(Some(&stored), Some("Sam")), "Samira");
        assert_eq!(name(Some(&blank), Some("Sam")), "Sam");
        assert_eq!(name(Some(&unnamed), Some("Sam")), "Sam");
        assert_eq!(name(Some(&blank), Some(" ")), "Friend");
        assert_eq!(name(None, None), "Friend");
    }

    #[tokio::test]
    async fn test_summary_for_new_user() {
        let db = Arc::new(DBService::new_in_memory().await.unwrap());
        let service = DashboardService::new(db.clone(), db.clone(), db.clone());

        let summary = service
            .summary(Uuid::new_v4(), None, Utc::now().date_naive())
            .await
            .unwrap();
        assert!(!summary.onboarding_completed);
        assert_eq!(summary.display_name, "Friend");
        assert!(summary.assessment.is_none());
        assert!(summary.life_wheel.is_none());
        assert_eq!(summary.progress.total, 0);
    }

    #[tokio::test]
    async fn test_summary_after_assessment() {
        let db = Arc::new(DBService::new_in_memory().await.unwrap());
        let service = DashboardService::new(db.clone(), db.clone(), db.clone());
        let user_id = Uuid::new_v4();
        db.create_and_complete_onboarding(user_id, &scores([5, 5, 5, 5, 5, 5]))
            .await
            .unwrap();

        let summary = service
            .summary(user_id, Some("Sam"), Utc::now().date_naive())
            .await
            .unwrap();
        assert!(summary.onboarding_completed);
        assert_eq!(summary.display_name, "Sam");
        assert_eq!(summary.life_wheel.unwrap().average_score, 5.0);
    }
}
