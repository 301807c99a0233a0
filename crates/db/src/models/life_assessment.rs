use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::{Executor, FromRow, Sqlite, SqlitePool};
use thiserror::Error;
use ts_rs::TS;
use uuid::Uuid;

use super::life_category::LifeCategory;

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreProblem {
    Missing,
    NotAWholeNumber,
    OutOfRange(i64),
}

/// Rejected assessment submission. Raised before anything is written.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid score for {category}. Must be a whole number between 1 and 10.")]
pub struct ScoreValidationError {
    pub category: LifeCategory,
    pub problem: ScoreProblem,
}

/// The six 1-10 self-ratings of one assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct AssessmentScores {
    pub health: i32,
    pub career: i32,
    pub relationships: i32,
    pub finances: i32,
    pub personal_growth: i32,
    pub leisure: i32,
}

impl AssessmentScores {
    /// Validate a `{ "<category>": <score>, ... }` submission.
    ///
    /// Categories are checked in declaration order and the first offending one is reported.
    /// Unknown keys are ignored.
    pub fn from_submission(scores: &Map<String, Value>) -> Result<Self, ScoreValidationError> {
        let mut values = [0i32; 6];
        for category in LifeCategory::ALL {
            values[category.ordinal()] = parse_score(category, scores.get(&category.to_string()))?;
        }
        let [health, career, relationships, finances, personal_growth, leisure] = values;
        Ok(Self {
            health,
            career,
            relationships,
            finances,
            personal_growth,
            leisure,
        })
    }

    pub fn score(&self, category: LifeCategory) -> i32 {
        match category {
            LifeCategory::Health => self.health,
            LifeCategory::Career => self.career,
            LifeCategory::Relationships => self.relationships,
            LifeCategory::Finances => self.finances,
            LifeCategory::PersonalGrowth => self.personal_growth,
            LifeCategory::Leisure => self.leisure,
        }
    }

    /// Mean of the six scores, rounded to one decimal place.
    pub fn average(&self) -> f64 {
        let total: i32 = LifeCategory::ALL.iter().map(|c| self.score(*c)).sum();
        (f64::from(total) / 6.0 * 10.0).round() / 10.0
    }
}

fn parse_score(category: LifeCategory, value: Option<&Value>) -> Result<i32, ScoreValidationError> {
    let fail = |problem| ScoreValidationError { category, problem };
    let value = value.ok_or_else(|| fail(ScoreProblem::Missing))?;
    let score = value
        .as_i64()
        .ok_or_else(|| fail(ScoreProblem::NotAWholeNumber))?;
    if !(i64::from(MIN_SCORE)..=i64::from(MAX_SCORE)).contains(&score) {
        return Err(fail(ScoreProblem::OutOfRange(score)));
    }
    Ok(score as i32)
}

/// A saved assessment. Never updated; retaking the assessment inserts a new row.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct LifeAssessment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub health_score: i32,
    pub career_score: i32,
    pub relationships_score: i32,
    pub finances_score: i32,
    pub personal_growth_score: i32,
    pub leisure_score: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LifeAssessment {
    pub fn scores(&self) -> AssessmentScores {
        AssessmentScores {
            health: self.health_score,
            career: self.career_score,
            relationships: self.relationships_score,
            finances: self.finances_score,
            personal_growth: self.personal_growth_score,
            leisure: self.leisure_score,
        }
    }

    pub async fn create<'e, E>(
        executor: E,
        id: Uuid,
        user_id: Uuid,
        scores: &AssessmentScores,
        now: DateTime<Utc>,
    ) -> Result<Self, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, LifeAssessment>(
            r#"INSERT INTO life_assessments (
                   id, user_id,
                   health_score, career_score, relationships_score,
                   finances_score, personal_growth_score, leisure_score,
                   created_at, updated_at
               )
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
               RETURNING id, user_id,
                   health_score, career_score, relationships_score,
                   finances_score, personal_growth_score, leisure_score,
                   created_at, updated_at"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(scores.health)
        .bind(scores.career)
        .bind(scores.relationships)
        .bind(scores.finances)
        .bind(scores.personal_growth)
        .bind(scores.leisure)
        .bind(now)
        .bind(now)
        .fetch_one(executor)
        .await
    }

    /// Newest assessment for the user, if any.
    pub async fn find_latest_for_user(
        pool: &SqlitePool,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, LifeAssessment>(
            r#"SELECT id, user_id,
                   health_score, career_score, relationships_score,
                   finances_score, personal_growth_score, leisure_score,
                   created_at, updated_at
               FROM life_assessments
               WHERE user_id = $1
               ORDER BY created_at DESC, rowid DESC
               LIMIT 1"#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }
}
