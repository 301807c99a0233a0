use std::{env, fs, path::PathBuf};

use coach_server::routes::{
    assessment::SubmitAssessment, health::HealthStatus, tasks::UpdateTaskCompletion,
};
use db::models::{
    daily_task::DailyTask, life_assessment::AssessmentScores, life_assessment::LifeAssessment,
    life_category::LifeCategory, profile::Profile,
};
use services::services::{
    dashboard::{DashboardSummary, LifeWheel, TaskProgress, WheelPoint},
    task_generator::GeneratedTask,
};
use ts_rs::TS;

fn generate_types_content() -> String {
    let decls = [
        LifeCategory::decl(),
        AssessmentScores::decl(),
        LifeAssessment::decl(),
        DailyTask::decl(),
        Profile::decl(),
        GeneratedTask::decl(),
        WheelPoint::decl(),
        LifeWheel::decl(),
        TaskProgress::decl(),
        DashboardSummary::decl(),
        SubmitAssessment::decl(),
        UpdateTaskCompletion::decl(),
        HealthStatus::decl(),
        utils::response::ApiResponse::<(), ()>::decl(),
    ];

    let body = decls
        .into_iter()
        .map(|decl| format!("export {decl}"))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "// This file was generated by `generate_types`. Do not edit by hand.\n\n{body}\n"
    )
}

fn main() -> anyhow::Result<()> {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("shared/types.ts"));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, generate_types_content())?;
    println!("Wrote TypeScript types to {}", path.display());
    Ok(())
}
