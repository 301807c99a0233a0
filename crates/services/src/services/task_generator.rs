//! Produces exactly three micro-tasks for the user's focus areas.
//!
//! The live path asks the language model for a JSON array and only trusts it after a
//! schema check. Anything that goes wrong on that path is logged and answered with the
//! static fallback pools, so callers always receive a full set.

use std::{str::FromStr, sync::Arc};

use db::models::{life_assessment::AssessmentScores, life_category::LifeCategory};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};
use ts_rs::TS;

use super::{
    completion::{CompletionError, CompletionRequest, CompletionService},
    fallback_tasks::fallback_tasks,
};

pub const TASKS_PER_DAY: usize = 3;
/// How many tasks must land in a focus category for a live batch to be accepted.
pub const MIN_FOCUS_TASKS: usize = 2;

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 1000;

const SYSTEM_PROMPT: &str = "You are a compassionate AI life coach specializing in helping people \
     rebuild their lives through small, achievable daily actions. Always respond with a valid JSON \
     array and nothing else.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTask {
    pub title: String,
    pub description: String,
    pub category: LifeCategory,
    pub estimated_minutes: i32,
    pub motivational_note: Option<String>,
}

/// Everything the generator needs to know about the user.
#[derive(Debug, Clone)]
pub struct TaskGenerationRequest {
    pub scores: AssessmentScores,
    pub focus: [LifeCategory; 2],
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("expected {expected} tasks, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("task {index} is not an object")]
    NotAnObject { index: usize },
    #[error("task {index} is missing or has an empty `{field}`")]
    MissingField { index: usize, field: &'static str },
    #[error("task {index} has unknown category `{value}`")]
    UnknownCategory { index: usize, value: String },
    #[error("task {index} has an invalid estimatedMinutes")]
    InvalidMinutes { index: usize },
    #[error("only {matching} tasks target the focus areas, need {required}")]
    OffFocus { matching: usize, required: usize },
}

#[derive(Debug, Error)]
pub enum GenerationFailure {
    #[error("no completion service configured")]
    NoClient,
    #[error("completion failed: {0}")]
    Completion(#[from] CompletionError),
    #[error("response is not a JSON array: {0}")]
    Unparseable(String),
    #[error("response failed schema check: {0}")]
    Schema(#[from] SchemaViolation),
}

/// Parse the raw model output into untrusted JSON elements.
pub fn parse_task_payload(raw: &str) -> Result<Vec<Value>, GenerationFailure> {
    let value: Value = serde_json::from_str(raw.trim())
        .map_err(|e| GenerationFailure::Unparseable(e.to_string()))?;
    match value {
        Value::Array(items) => Ok(items),
        other => Err(GenerationFailure::Unparseable(format!(
            "expected an array, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Check parsed elements against the task schema and the focus-area requirement.
pub fn validate_task_payload(
    items: &[Value],
    focus: &[LifeCategory; 2],
) -> Result<Vec<GeneratedTask>, SchemaViolation> {
    if items.len() != TASKS_PER_DAY {
        return Err(SchemaViolation::WrongLength {
            expected: TASKS_PER_DAY,
            actual: items.len(),
        });
    }

    let tasks = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let object = item
                .as_object()
                .ok_or(SchemaViolation::NotAnObject { index })?;
            validate_task(index, object)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let matching = tasks.iter().filter(|t| focus.contains(&t.category)).count();
    if matching < MIN_FOCUS_TASKS {
        return Err(SchemaViolation::OffFocus {
            matching,
            required: MIN_FOCUS_TASKS,
        });
    }

    Ok(tasks)
}

fn validate_task(index: usize, object: &Map<String, Value>) -> Result<GeneratedTask, SchemaViolation> {
    let text = |field: &'static str| {
        object
            .get(field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or(SchemaViolation::MissingField { index, field })
    };

    let title = text("title")?;
    let description = text("description")?;
    let category_raw = text("category")?;
    let category = LifeCategory::from_str(&category_raw).map_err(|_| {
        SchemaViolation::UnknownCategory {
            index,
            value: category_raw.clone(),
        }
    })?;
    let estimated_minutes = match object.get("estimatedMinutes") {
        None | Some(Value::Null) => {
            return Err(SchemaViolation::MissingField {
                index,
                field: "estimatedMinutes",
            });
        }
        Some(value) => value
            .as_u64()
            .filter(|&m| m > 0)
            .and_then(|m| i32::try_from(m).ok())
            .ok_or(SchemaViolation::InvalidMinutes { index })?,
    };
    let motivational_note = text("motivationalNote")?;

    Ok(GeneratedTask {
        title,
        description,
        category,
        estimated_minutes,
        motivational_note: Some(motivational_note),
    })
}

/// Coaching prompt for the live path.
pub fn build_prompt(request: &TaskGenerationRequest) -> String {
    let focus_lines = request
        .focus
        .iter()
        .map(|c| {
            format!(
                "  - {}: {}/10 - {}",
                c.label(),
                request.scores.score(*c),
                c.description()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let focus_labels = request
        .focus
        .iter()
        .map(|c| c.label())
        .collect::<Vec<_>>()
        .join(" and ");
    let focus_slugs = request
        .focus
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let category_slugs = LifeCategory::ALL
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("|");
    let greeting = match request.user_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => format!("The person you are coaching is called {name}.\n"),
        _ => String::new(),
    };

    format!(
        r#"You are an AI life coach helping someone on their journey of personal rebirth and growth.
{greeting}
USER CONTEXT:
- Life Assessment Scores (1-10 scale):
{focus_lines}

TASK: Generate exactly 3 micro-tasks (5-10 minutes each) for today that will help improve the lowest-scoring areas.

GUIDELINES:
- Tasks must be SIMPLE, SPECIFIC, and ACHIEVABLE in 5-10 minutes
- Focus on the two weakest areas: {focus_labels}
- Make tasks actionable and concrete (not vague like "exercise more")
- Include a brief motivational note for each task
- Consider that this person is rebuilding their life - be encouraging and realistic

RESPONSE FORMAT (JSON array, no other text):
[
  {{
    "title": "Clear, actionable task title",
    "description": "Specific steps to complete this task",
    "category": "{category_slugs}",
    "estimatedMinutes": 5,
    "motivationalNote": "Brief, encouraging message"
  }}
]

At least 2 of the 3 tasks must use one of these categories: {focus_slugs}.
"#
    )
}

/// Live generation with deterministic fallback.
#[derive(Clone)]
pub struct TaskGenerator {
    completion: Option<Arc<dyn CompletionService>>,
}

impl TaskGenerator {
    pub fn new(completion: Option<Arc<dyn CompletionService>>) -> Self {
        Self { completion }
    }

    /// Generator that never calls a model.
    pub fn fallback_only() -> Self {
        Self { completion: None }
    }

    pub fn has_live_model(&self) -> bool {
        self.completion.is_some()
    }

    /// Ask the model for tasks and validate the answer. Makes exactly one attempt.
    pub async fn request_live_tasks(
        &self,
        request: &TaskGenerationRequest,
    ) -> Result<Vec<GeneratedTask>, GenerationFailure> {
        let completion = self.completion.as_ref().ok_or(GenerationFailure::NoClient)?;
        let raw = completion
            .complete(&CompletionRequest {
                system: Some(SYSTEM_PROMPT.to_string()),
                prompt: build_prompt(request),
                temperature: TEMPERATURE,
                max_tokens: MAX_TOKENS,
            })
            .await?;
        let items = parse_task_payload(&raw)?;
        Ok(validate_task_payload(&items, &request.focus)?)
    }

    /// Always returns exactly three tasks.
    pub async fn generate(
        &self,
        request: &TaskGenerationRequest,
        rng: &mut (dyn RngCore + Send),
    ) -> Vec<GeneratedTask> {
        match self.request_live_tasks(request).await {
            Ok(tasks) => {
                info!(focus = ?request.focus, "Generated tasks with language model");
                tasks
            }
            Err(GenerationFailure::NoClient) => {
                info!(focus = ?request.focus, "No language model configured, using fallback tasks");
                fallback_tasks(&request.focus, rng)
            }
            Err(e) => {
                warn!(error = %e, focus = ?request.focus, "Task generation failed, using fallback tasks");
                fallback_tasks(&request.focus, rng)
            }
        }
    }
}
